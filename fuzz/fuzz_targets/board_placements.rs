#![no_main]

use libfuzzer_sys::fuzz_target;
use shape_puzzle::{Board, GapCatalog, Mask, Shape};

#[derive(Debug, arbitrary::Arbitrary)]
struct Placement {
    piece: u8,
    orientation: u8,
    row: i8,
    col: i8,
}

#[derive(Debug, arbitrary::Arbitrary)]
struct BoardInput {
    rows: u8,
    cols: u8,
    placements: Vec<Placement>,
}

const PIECES: &[&[&[u8]]] = &[
    &[&[1, 1, 0], &[1, 1, 1]],
    &[&[1, 0, 1], &[1, 1, 1]],
    &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]],
    &[&[1, 0, 0, 0], &[1, 1, 1, 1]],
    &[&[1, 1], &[1, 1]],
    &[&[1]],
];

fuzz_target!(|data: BoardInput| {
    let rows = usize::from(data.rows % 8) + 1;
    let cols = usize::from(data.cols % 8) + 1;
    let mut board = Board::new(rows, cols).unwrap();
    let catalog = GapCatalog::new(&board);

    for placement in data.placements.iter().take(16) {
        let grid = PIECES[usize::from(placement.piece) % PIECES.len()];
        let shape = Shape::piece(board.num_shapes() + 1, grid).unwrap();
        let orientations = shape.permutations();
        let orientation = &orientations[usize::from(placement.orientation) % orientations.len()];
        let moved = orientation.translate(
            i32::from(placement.row % 10),
            i32::from(placement.col % 10),
        );

        let before = board.mask();
        match board.place(moved.clone()) {
            Ok(next) => {
                assert!(!before.intersects(moved.mask()));
                assert!(board.region_mask().covers(moved.mask()));
                assert_eq!(next.mask(), before | moved.mask());
                assert_eq!(next.num_shapes(), board.num_shapes() + 1);
                board = next;
            }
            Err(_) => assert_eq!(board.mask(), before),
        }

        assert_eq!(catalog.rejects(&board), catalog.find_match(&board).is_some());
    }

    if board.is_complete() {
        assert!(catalog.find_match(&board).is_none());
    }
    assert_eq!(board.empty_cells() | board.mask(), board.region_mask());
    assert_eq!(board.mask() & !board.region_mask(), Mask::EMPTY);
});
