use shape_puzzle::{make_shapes, Board, Shape};

/// Install a logger for the test binary. Safe to call from every test.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Generate a shape from an input string.
///
/// # Expected Format
///  - Rows are separated by `/`
///  - Each row is a string of `0` (empty) and `1` (filled) characters
///
/// For example `"110/111"` is the shape
///
/// ```text
/// ┌───┬───┬───┐
/// │ X │ X │   │
/// ├───┼───┼───┤
/// │ X │ X │ X │
/// └───┴───┴───┘
/// ```
///
/// # Panics
///  - If any character is not `0` or `1`
///  - If the grid is not a valid puzzle piece
#[allow(dead_code)]
pub fn parse_shape(id: usize, input: &str) -> Shape {
    let rows: Vec<Vec<u8>> = input
        .split('/')
        .map(|row| {
            row.chars()
                .map(|c| match c {
                    '0' => 0,
                    '1' => 1,
                    other => panic!("Unexpected character [{}] in shape [{}]", other, input),
                })
                .collect()
        })
        .collect();

    log::debug!("Parsed shape #{} from [{}]: {:?}", id, input, rows);

    Shape::piece(id, &rows).unwrap()
}

/// Parse a list of shapes, numbering them from 1 in the order given.
#[allow(dead_code)]
pub fn parse_shapes(inputs: &[&str]) -> Vec<Shape> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| parse_shape(index + 1, input))
        .collect()
}

/// Format a board as rows of shape ids, separated by `/`. Empty cells are
/// `.`, shape ids above 9 are printed as letters starting from `a`.
#[allow(dead_code)]
pub fn format_board(board: &Board) -> String {
    (0..board.num_rows())
        .map(|row| {
            (0..board.num_cols())
                .map(|col| match board.shape_at(row, col) {
                    None => '.',
                    Some(id) => char::from_digit(id as u32, 36).unwrap_or('?'),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The five pieces of the 5×5 reference puzzle.
#[allow(dead_code)]
pub fn reference_5x5_shapes() -> Vec<Shape> {
    let grids: Vec<Vec<Vec<u8>>> = vec![
        vec![vec![1, 1, 1], vec![1, 0, 0], vec![1, 0, 0], vec![1, 0, 0]],
        vec![vec![1, 1, 0], vec![1, 1, 1]],
        vec![vec![1, 1, 1], vec![0, 1, 0]],
        vec![vec![0, 0, 1, 1], vec![1, 1, 1, 0]],
        vec![vec![1, 0, 1], vec![1, 1, 1]],
    ];
    make_shapes(&grids).unwrap()
}

/// The eleven pieces of the 8×8 puzzle, covering 64 cells in total.
#[allow(dead_code)]
pub fn puzzle_8x8_shapes() -> Vec<Shape> {
    parse_shapes(&[
        "110/111",
        "101/111",
        "10000/11111",
        "1111/1001",
        "111/111/011",
        "010/111/010",
        "010/010/111",
        "0011/1111",
        "011/110/100",
        "1000/1000/1000/1111",
        "1000/1111/1000",
    ])
}
