use polyomino_tiling::{Placement, ShapeCatalog};

/// Install a test logger. Safe to call from every test.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Check that `placements` is an exact tiling of a `width` × `height` board
/// with the given instances.
///
/// # Panics
///  - If the number of placements differs from the number of instances.
///  - If a placement's shape differs from its instance.
///  - If a footprint leaves the board.
///  - If a cell is covered twice or not at all.
#[allow(dead_code)]
pub fn assert_valid_tiling<C>(
    catalog: &C,
    width: usize,
    height: usize,
    instances: &[char],
    placements: &[Placement],
) where
    C: ShapeCatalog + ?Sized,
{
    assert_eq!(
        placements.len(),
        instances.len(),
        "Every instance must be placed exactly once."
    );

    let mut owners = vec![None; width * height];
    for (instance, (placement, &shape)) in placements.iter().zip(instances).enumerate() {
        assert_eq!(placement.shape, shape, "Instance [{instance}] has the wrong shape.");

        let footprint = &catalog
            .mutations(shape)
            .expect("Shape must be in the catalog.")[placement.mutation];
        for (row, column) in placement.cells(footprint) {
            assert!(
                row < height && column < width,
                "Instance [{instance}] leaves the board at [{row},{column}]."
            );
            let owner = &mut owners[row * width + column];
            assert!(
                owner.is_none(),
                "Cell [{row},{column}] is covered by instances [{:?}] and [{instance}].",
                owner
            );
            *owner = Some(instance);
        }
    }

    assert!(
        owners.iter().all(Option::is_some),
        "Every cell must be covered."
    );
}

/// Parse a letter list like `"LPUY"` into instances.
#[allow(dead_code)]
pub fn instances(letters: &str) -> Vec<char> {
    letters.chars().collect()
}
