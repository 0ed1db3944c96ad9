//! Pipeline stages of the search.
//!
//! Every shape gets its own stage. A stage reads partial boards from its
//! predecessor, tries every placement of its shape on each of them, and passes
//! the boards that survive on to the next stage. If the last stage ever emits a
//! board, every shape has been placed without overlap.
//!
//! Stages communicate through bounded [`crossbeam_channel`] queues, so a fast
//! early stage blocks once its queue is full instead of buffering without
//! limit. A stage closes its output by dropping the sender when its input (or,
//! for the first stage, its own enumeration) is exhausted. Stages also stop
//! early when the shared [`CancelToken`] is set or when the downstream
//! receiver goes away.

use crate::{board::Board, gaps::GapCatalog, shape::Shape};
use crossbeam_channel::{Receiver, Sender};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cooperative shutdown flag shared by every stage of one search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every stage holding this token to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Return true once [`CancelToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counters collected by one stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    /// Id of the shape placed by the stage.
    pub shape_id: usize,
    /// Number of placements the stage tries on each input board.
    pub candidates: usize,
    /// Number of boards read from the previous stage.
    pub boards_in: usize,
    /// Number of boards passed on.
    pub generated: usize,
    /// Number of non-colliding placements dropped by the gap catalog.
    pub rejected: usize,
    /// True if the stage stopped before exhausting its input.
    pub cancelled: bool,
}

/// Generate the boards for the first shape.
///
/// Every orientation of `shape` is tried at every position whose row is at
/// most half the board height and whose column is at most half the board
/// width. On an empty board any placement elsewhere is a mirror image of one
/// of these, so solutions are only lost up to symmetry of the whole board.
/// Placements matching the gap catalog are dropped.
pub fn first_placements(
    shape: &Shape,
    board: &Board,
    catalog: &GapCatalog,
    out: Sender<Board>,
    cancel: &CancelToken,
) -> StageReport {
    let mut report = StageReport {
        shape_id: shape.id(),
        boards_in: 1,
        ..StageReport::default()
    };

    'orientations: for orientation in shape.permutations() {
        for (r, c) in positions(board, &orientation, true) {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break 'orientations;
            }
            report.candidates += 1;

            let place = orientation.translate(r, c);
            if catalog.rejects_mask(board.mask() | place.mask()) {
                log::trace!(
                    "Rejected first placement (S#{}) at ({}, {}).",
                    place.id(),
                    r,
                    c
                );
                report.rejected += 1;
                continue;
            }

            let next = board.place_unchecked(place);
            log::trace!("Generating first placement (S#{}):\n{}", shape.id(), next);
            if out.send(next).is_err() {
                report.cancelled = true;
                break 'orientations;
            }
            report.generated += 1;
        }
    }

    log::debug!(
        "Total first placements (S#{}): {} generated, {} rejected.",
        report.shape_id,
        report.generated,
        report.rejected
    );
    report
}

/// Compute every placement of `shape` on an empty board the size of `base`,
/// in orientation order then row-major position order.
///
/// A placement that already leaves a dead void on an empty board leaves one on
/// any board, so those are dropped here once instead of for every input board.
pub fn prepare_placements(shape: &Shape, base: &Board, catalog: &GapCatalog) -> Vec<Shape> {
    let mut placements = Vec::new();

    for orientation in shape.permutations() {
        for (r, c) in positions(base, &orientation, false) {
            let place = orientation.translate(r, c);
            if catalog.rejects_mask(place.mask()) {
                log::trace!(
                    "Rejected prepared placement (S#{}) at ({}, {}).",
                    place.id(),
                    r,
                    c
                );
                continue;
            }
            placements.push(place);
        }
    }

    placements
}

/// Place `shape` on each board read from `input` and emit the results.
///
/// For every input board, each prepared placement that does not collide with
/// the board and does not leave a dead void is passed on to `out`.
pub fn next_placements(
    shape: &Shape,
    base: &Board,
    catalog: &GapCatalog,
    input: Receiver<Board>,
    out: Sender<Board>,
    cancel: &CancelToken,
) -> StageReport {
    let placements = prepare_placements(shape, base, catalog);
    let mut report = StageReport {
        shape_id: shape.id(),
        candidates: placements.len(),
        ..StageReport::default()
    };
    log::debug!(
        "Prepared {} placements (S#{}).",
        placements.len(),
        shape.id()
    );

    'boards: for board in input.iter() {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }
        report.boards_in += 1;

        for place in &placements {
            if board.mask().intersects(place.mask()) {
                continue;
            }
            if catalog.rejects_mask(board.mask() | place.mask()) {
                report.rejected += 1;
                continue;
            }

            let next = board.place_unchecked(place.clone());
            log::trace!("Generating placement (S#{}):\n{}", place.id(), next);
            if cancel.is_cancelled() || out.send(next).is_err() {
                report.cancelled = true;
                break 'boards;
            }
            report.generated += 1;
        }
    }

    log::debug!(
        "Total placements (S#{}): {} boards in, {} generated, {} rejected.",
        report.shape_id,
        report.boards_in,
        report.generated,
        report.rejected
    );
    report
}

/// Offsets at which `shape` fits entirely inside `board`, row-major. With
/// `upper_left` set, offsets are further limited to the upper left quadrant.
fn positions(board: &Board, shape: &Shape, upper_left: bool) -> Vec<(i32, i32)> {
    let (rows, cols) = (board.num_rows(), board.num_cols());
    let (height, width) = (shape.num_rows(), shape.num_cols());
    if height > rows || width > cols {
        return Vec::new();
    }

    let (mut max_row, mut max_col) = (rows - height, cols - width);
    if upper_left {
        max_row = max_row.min(rows / 2);
        max_col = max_col.min(cols / 2);
    }

    (0..=max_row as i32)
        .flat_map(|r| (0..=max_col as i32).map(move |c| (r, c)))
        .collect()
}
