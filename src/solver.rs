//! Solver configuration, stage spawning and the stream of solutions.

use crate::{
    board::Board,
    error::PuzzleError,
    gaps::GapCatalog,
    pipeline::{first_placements, next_placements, CancelToken, StageReport},
    shape::Shape,
};
use crossbeam_channel::{bounded, Receiver};
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

/// Default capacity of the queue between two stages.
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

/// Which voids are treated as dead during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pruning {
    /// Use every template of the gap catalog, voids of up to four cells.
    ///
    /// This assumes every piece has at least five cells. Puzzles with smaller
    /// pieces may lose solutions.
    #[default]
    Full,
    /// Only prune voids with fewer cells than the smallest piece.
    SmallerThanPieces,
    /// Never prune, try every non-colliding placement.
    Off,
}

/// Tuning knobs of a [`Solver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Capacity of each bounded queue between stages.
    pub queue_capacity: usize,
    /// Stop after this many solutions. `None` enumerates every solution.
    pub limit: Option<usize>,
    /// Pruning strategy.
    pub pruning: Pruning,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            limit: None,
            pruning: Pruning::default(),
        }
    }
}

impl SolverConfig {
    /// Set the capacity of each inter-stage queue. Zero makes every queue a
    /// rendezvous channel.
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    /// Stop the search after `limit` solutions.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Select the pruning strategy.
    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }
}

/// Solver that finds every way to place a list of shapes on a board so that
/// every cell is covered.
///
/// Shapes are placed in the order given, one pipeline stage per shape. The
/// first shape is only tried in the upper left quadrant of an empty board,
/// which drops most solutions that are mirror images of another one.
#[derive(Debug, Clone)]
pub struct Solver {
    board: Board,
    shapes: Vec<Shape>,
    config: SolverConfig,
}

impl Solver {
    /// Create a new `Solver` for placing `shapes` on `board`.
    ///
    /// The board may already carry placements; they are kept in every
    /// solution. A total shape area that does not match the free area of the
    /// board is allowed, but then no board produced will be fully covered.
    pub fn new(board: Board, shapes: Vec<Shape>) -> Result<Self, PuzzleError> {
        if shapes.is_empty() {
            return Err(PuzzleError::NoShapes);
        }
        if let Some(shape) = shapes.iter().find(|shape| shape.has_gaps()) {
            return Err(PuzzleError::ReservedGapCell { id: shape.id() });
        }

        let shape_area: usize = shapes.iter().map(Shape::cell_count).sum();
        let free_area = board.empty_cells().count() as usize;
        if shape_area != free_area {
            log::warn!(
                "Shapes cover {} cells but the board has {} free cells, no tiling exists.",
                shape_area,
                free_area
            );
        }

        for shape in &shapes {
            let (height, width) = (shape.num_rows(), shape.num_cols());
            let fits = |rows, cols| height <= rows && width <= cols;
            if !fits(board.num_rows(), board.num_cols()) && !fits(board.num_cols(), board.num_rows())
            {
                log::warn!(
                    "Shape #{} ({}x{}) does not fit on the {}x{} board.",
                    shape.id(),
                    height,
                    width,
                    board.num_rows(),
                    board.num_cols()
                );
            }
        }

        for (index, a) in shapes.iter().enumerate() {
            for b in &shapes[index + 1..] {
                if a.is_congruent(b) {
                    log::debug!(
                        "Shapes #{} and #{} are congruent, solutions repeat with them swapped.",
                        a.id(),
                        b.id()
                    );
                }
            }
        }

        Ok(Self {
            board,
            shapes,
            config: SolverConfig::default(),
        })
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The current configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The board the search starts from.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The shapes to place, in placement order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Build the gap catalog selected by the configured [`Pruning`].
    pub fn catalog(&self) -> GapCatalog {
        match self.config.pruning {
            Pruning::Full => GapCatalog::new(&self.board),
            Pruning::SmallerThanPieces => {
                let smallest = self
                    .shapes
                    .iter()
                    .map(Shape::cell_count)
                    .min()
                    .unwrap_or(0);
                GapCatalog::with_max_gap(&self.board, smallest.saturating_sub(1))
            }
            Pruning::Off => GapCatalog::empty(),
        }
    }

    /// Start the search and return the stream of solutions.
    ///
    /// The stages run on their own threads; solutions are produced while the
    /// stream is consumed. Dropping the stream stops the search.
    pub fn solve(&self) -> Result<Solutions, PuzzleError> {
        let catalog = Arc::new(self.catalog());
        let cancel = CancelToken::new();
        log::info!(
            "Solving {}x{} board with {} shapes, {} gap patterns.",
            self.board.num_rows(),
            self.board.num_cols(),
            self.shapes.len(),
            catalog.len()
        );

        let mut handles = Vec::with_capacity(self.shapes.len());
        match self.spawn_stages(&catalog, &cancel, &mut handles) {
            Ok(receiver) => Ok(Solutions {
                receiver: Some(receiver),
                cancel,
                handles,
                remaining: self.config.limit,
                produced: 0,
            }),
            Err(err) => {
                // Unblock the stages that did start so they can exit.
                cancel.cancel();
                Err(err)
            }
        }
    }

    /// Return the first solution found, if any, and stop the search.
    pub fn first_solution(&self) -> Result<Option<Board>, PuzzleError> {
        Ok(self.solve()?.next())
    }

    /// Count the solutions, up to the configured limit.
    pub fn count_solutions(&self) -> Result<usize, PuzzleError> {
        Ok(self.solve()?.count())
    }

    fn spawn_stages(
        &self,
        catalog: &Arc<GapCatalog>,
        cancel: &CancelToken,
        handles: &mut Vec<JoinHandle<StageReport>>,
    ) -> Result<Receiver<Board>, PuzzleError> {
        let capacity = self.config.queue_capacity;
        let base = self.board.cleared();
        let mut shapes = self.shapes.iter().enumerate();

        let mut upstream = if self.board.num_shapes() == 0 {
            // `shapes` is never empty, see `Solver::new`.
            let (stage, shape) = shapes.next().ok_or(PuzzleError::NoShapes)?;
            let (tx, rx) = bounded(capacity);
            let (shape, board, catalog, cancel) =
                (shape.clone(), base.clone(), catalog.clone(), cancel.clone());
            let shape_id = shape.id();
            handles.push(spawn_stage(stage, shape_id, move || {
                first_placements(&shape, &board, &catalog, tx, &cancel)
            })?);
            rx
        } else {
            let (tx, rx) = bounded(1);
            // The receiver is alive and the queue empty, so this cannot fail.
            let _ = tx.send(self.board.clone());
            rx
        };

        for (stage, shape) in shapes {
            let (tx, rx) = bounded(capacity);
            let (shape, board, catalog, cancel) =
                (shape.clone(), base.clone(), catalog.clone(), cancel.clone());
            let shape_id = shape.id();
            handles.push(spawn_stage(stage, shape_id, move || {
                next_placements(&shape, &board, &catalog, upstream, tx, &cancel)
            })?);
            upstream = rx;
        }

        Ok(upstream)
    }
}

fn spawn_stage<F>(
    stage: usize,
    shape_id: usize,
    f: F,
) -> Result<JoinHandle<StageReport>, PuzzleError>
where
    F: FnOnce() -> StageReport + Send + 'static,
{
    thread::Builder::new()
        .name(format!("stage-{}-shape-{}", stage, shape_id))
        .spawn(f)
        .map_err(|source| PuzzleError::StageSpawn { stage, source })
}

/// Stream of solved boards produced by [`Solver::solve`].
///
/// Every board yielded has all shapes placed without overlap. When the shape
/// areas add up to the free area of the board, that makes it a complete
/// tiling. Dropping the stream, or reaching the configured limit, cancels the
/// search and waits for the stage threads to exit.
#[derive(Debug)]
pub struct Solutions {
    receiver: Option<Receiver<Board>>,
    cancel: CancelToken,
    handles: Vec<JoinHandle<StageReport>>,
    remaining: Option<usize>,
    produced: usize,
}

impl Solutions {
    /// Stop the search. Further calls to `next` return `None`.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.receiver = None;
    }

    /// Number of solutions yielded so far.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Stop the search, wait for every stage and return their reports in
    /// stage order.
    pub fn finish(mut self) -> Vec<StageReport> {
        self.cancel();
        self.join()
    }

    fn join(&mut self) -> Vec<StageReport> {
        self.handles
            .drain(..)
            .filter_map(|handle| match handle.join() {
                Ok(report) => Some(report),
                Err(_) => {
                    log::warn!("A pipeline stage panicked.");
                    None
                }
            })
            .collect()
    }
}

impl Iterator for Solutions {
    type Item = Board;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            self.cancel();
            return None;
        }

        match self.receiver.as_ref()?.recv() {
            Ok(board) => {
                self.produced += 1;
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
                Some(board)
            }
            Err(_) => {
                log::info!("Search finished with {} solutions.", self.produced);
                self.receiver = None;
                None
            }
        }
    }
}

impl Drop for Solutions {
    fn drop(&mut self) {
        self.cancel();
        self.join();
    }
}

/// Start solving with the default configuration.
pub fn solve(board: Board, shapes: Vec<Shape>) -> Result<Solutions, PuzzleError> {
    Solver::new(board, shapes)?.solve()
}
