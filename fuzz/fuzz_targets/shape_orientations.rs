#![no_main]

use libfuzzer_sys::fuzz_target;
use shape_puzzle::{PuzzleError, Shape};

#[derive(Debug)]
struct ShapeInput {
    rows: Vec<Vec<u8>>,
}

impl<'a> arbitrary::Arbitrary<'a> for ShapeInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let height = u.int_in_range(1..=8)?;
        let width = u.int_in_range(1..=8)?;
        let rows = (0..height)
            .map(|_| {
                (0..width)
                    .map(|_| u.int_in_range(0..=1))
                    .collect::<arbitrary::Result<Vec<u8>>>()
            })
            .collect::<arbitrary::Result<_>>()?;

        Ok(ShapeInput { rows })
    }
}

fuzz_target!(|data: ShapeInput| {
    let shape = match Shape::piece(1, &data.rows) {
        Ok(shape) => shape,
        Err(PuzzleError::EmptyShape { .. }) => return,
        Err(err) => panic!("Unexpected error: {}", err),
    };

    let orientations = shape.permutations();
    assert!(!orientations.is_empty() && orientations.len() <= 8);
    assert_eq!(8 % orientations.len(), 0);

    for (index, orientation) in orientations.iter().enumerate() {
        assert_eq!(orientation.mask().count() as usize, shape.cell_count());
        assert!(orientation.is_congruent(&shape));
        assert_eq!(orientation.pattern().canonical(), shape.pattern().canonical());
        assert!(!orientations[index + 1..].contains(orientation));
    }
});
