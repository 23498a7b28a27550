//! Shape geometry consumed by the solvers.
//!
//! A [`ShapeCatalog`] maps a shape identifier to its ordered list of distinct
//! [`Footprint`]s, one per rotation/reflection ("mutation"). The solvers only
//! read from a catalog, so one instance can be shared by any number of
//! concurrent solves.

use crate::error::TilingError;
use std::{collections::HashMap, sync::OnceLock};

/// Lookup table from shape identifier to the shape's mutations.
pub trait ShapeCatalog {
    /// Return the ordered mutations of the given shape, or `None` if the
    /// shape is unknown.
    fn mutations(&self, shape: char) -> Option<&[Footprint]>;

    /// Return the number of cells covered by every shape in the catalog.
    fn cell_area(&self) -> usize;
}

impl<C> ShapeCatalog for &C
where
    C: ShapeCatalog + ?Sized,
{
    fn mutations(&self, shape: char) -> Option<&[Footprint]> {
        <C as ShapeCatalog>::mutations(self, shape)
    }

    fn cell_area(&self) -> usize {
        <C as ShapeCatalog>::cell_area(self)
    }
}

/// Boolean occupancy matrix of one mutation of a shape.
///
/// The mask is stored row after row, so the cell in row `i` and column `j` is
/// found at index `i * width + j`. Only the width is stored explicitly.
#[derive(Debug, PartialEq, Eq, Clone, PartialOrd, Ord, Hash)]
pub struct Footprint {
    width: usize,
    mask: Vec<bool>,
}

impl Footprint {
    /// Create a new `Footprint` of a given width and mask.
    ///
    /// Empty rows and columns on the edges are trimmed, so every border row
    /// and column of the stored footprint has at least one occupied cell.
    ///
    /// # Panics
    ///  - If `init_width` is zero or `init_mask` is empty.
    ///  - If the mask length is not a multiple of the width.
    ///  - If no cell of the mask is occupied.
    pub fn new(init_width: usize, init_mask: Vec<bool>) -> Self {
        assert!(init_width != 0, "Width of footprint must be non-zero.");
        assert!(!init_mask.is_empty(), "Mask cannot be empty.");
        assert!(
            init_mask.len() % init_width == 0,
            "Mask with incorrect length - incorrect number of elements supplied."
        );

        let init_height = init_mask.len() / init_width;
        let row_empty = |r: usize| !init_mask[r * init_width..(r + 1) * init_width].contains(&true);
        let column_empty = |c: usize| {
            init_mask
                .iter()
                .skip(c)
                .step_by(init_width)
                .all(|cell| !*cell)
        };

        let top = (0..init_height).find(|r| !row_empty(*r));
        let Some(top) = top else {
            panic!("No occupied cells found - footprint mask empty!");
        };
        let bottom = (top..init_height).rev().find(|r| !row_empty(*r)).unwrap_or(top);
        let left = (0..init_width).find(|c| !column_empty(*c)).unwrap_or(0);
        let right = (left..init_width)
            .rev()
            .find(|c| !column_empty(*c))
            .unwrap_or(left);

        let width = right - left + 1;
        let mask = (top..=bottom)
            .flat_map(|r| (left..=right).map(move |c| (r, c)))
            .map(|(r, c)| init_mask[r * init_width + c])
            .collect();

        Self { width, mask }
    }

    /// Return the number of columns spanned by the footprint.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Return the number of rows spanned by the footprint.
    pub fn height(&self) -> usize {
        self.mask.len() / self.width
    }

    /// Return true if the cell at the given offset is occupied.
    pub fn is_filled(&self, row: usize, column: usize) -> bool {
        column < self.width && self.mask.get(row * self.width + column) == Some(&true)
    }

    /// Return the number of occupied cells.
    pub fn cell_area(&self) -> usize {
        self.mask.iter().filter(|cell| **cell).count()
    }

    /// Return an iterator over the `(row, column)` offsets of the occupied
    /// cells, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(index, _)| (index / width, index % width))
    }

    /// Return this footprint turned a quarter clockwise.
    pub fn rotate(&self) -> Self {
        let columns = self.width();
        let rows = self.height();
        let mut rotated = Vec::with_capacity(self.mask.len());

        for c in 0..columns {
            for r in (0..rows).rev() {
                rotated.push(self.mask[r * columns + c]);
            }
        }

        Self::new(rows, rotated)
    }

    /// Return this footprint mirrored top to bottom.
    pub fn reflect(&self) -> Self {
        let width = self.width;
        let reflected = self
            .mask
            .chunks(width)
            .rev()
            .flatten()
            .copied()
            .collect();

        Self::new(width, reflected)
    }
}

impl<const W: usize, const H: usize> From<[[u8; W]; H]> for Footprint {
    fn from(arr: [[u8; W]; H]) -> Self {
        let mask = arr
            .iter()
            .flat_map(|row| row.iter().map(|cell| *cell != 0))
            .collect();

        Self::new(W, mask)
    }
}

/// Available transformations when deriving the mutations of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeTransform {
    /// No transformation applied to the shape.
    NoTransform,
    /// Allow rotations of the shape.
    PureRotation,
    /// Allow rotations and reflections of the shape.
    FullSymmetry,
}

/// Return the distinct mutations of `shape` allowed by `transform`, in a
/// canonical (sorted) order.
pub fn mutations_of(shape: &Footprint, transform: ShapeTransform) -> Vec<Footprint> {
    let mut mutations = match transform {
        ShapeTransform::NoTransform => vec![shape.clone()],
        ShapeTransform::PureRotation => rotations(shape),
        ShapeTransform::FullSymmetry => {
            let mut all = rotations(shape);
            let reflections: Vec<_> = all.iter().map(Footprint::reflect).collect();
            all.extend(reflections);
            all
        }
    };

    mutations.sort();
    mutations.dedup();
    mutations
}

fn rotations(shape: &Footprint) -> Vec<Footprint> {
    let mut rotations = vec![shape.clone()];
    let mut current = shape.clone();
    for _ in 0..3 {
        current = current.rotate();
        rotations.push(current.clone());
    }
    rotations
}

/// Check the board dimensions against the catalog's cell area and look up the
/// mutations of every instance, in input order.
pub(crate) fn resolve_instances<'c, C>(
    catalog: &'c C,
    width: usize,
    height: usize,
    instances: &[char],
) -> Result<Vec<&'c [Footprint]>, TilingError>
where
    C: ShapeCatalog + ?Sized,
{
    let cell_area = catalog.cell_area();
    let board_cells = width.checked_mul(height).unwrap_or(0);
    if board_cells == 0 || cell_area == 0 || board_cells % cell_area != 0 {
        return Err(TilingError::InvalidDimensions {
            width,
            height,
            cell_area,
        });
    }

    instances
        .iter()
        .map(|&shape| {
            catalog
                .mutations(shape)
                .ok_or(TilingError::UnknownShape(shape))
        })
        .collect()
}

/// In-memory [`ShapeCatalog`] built from base shapes.
#[derive(Debug, Clone)]
pub struct Catalog {
    shapes: HashMap<char, Vec<Footprint>>,
    cell_area: usize,
}

impl Catalog {
    /// Build a catalog from `(identifier, base footprint)` pairs, deriving
    /// each shape's mutations with the given transform.
    ///
    /// # Panics
    ///  - If no shapes are given.
    ///  - If two shapes cover a different number of cells.
    ///  - If the same identifier is given twice.
    pub fn from_shapes(
        shapes: impl IntoIterator<Item = (char, Footprint)>,
        transform: ShapeTransform,
    ) -> Self {
        let mut table = HashMap::new();
        let mut cell_area = None;

        for (id, base) in shapes {
            let area = *cell_area.get_or_insert(base.cell_area());
            assert_eq!(
                area,
                base.cell_area(),
                "Every shape in a catalog must cover the same number of cells."
            );

            let previous = table.insert(id, mutations_of(&base, transform));
            assert!(previous.is_none(), "Shape [{id}] was given more than once.");
        }

        let Some(cell_area) = cell_area else {
            panic!("Shape list cannot be empty.");
        };

        log::debug!(
            "Built catalog with [{}] shapes of area [{}].",
            table.len(),
            cell_area
        );

        Self {
            shapes: table,
            cell_area,
        }
    }

    /// Build the catalog of the twelve free pentominoes, identified by their
    /// conventional letters `F I L N P T U V W X Y Z`.
    pub fn pentominoes() -> Self {
        Self::from_shapes(
            [
                ('F', Footprint::from([[0, 1, 1], [1, 1, 0], [0, 1, 0]])),
                ('I', Footprint::from([[1, 1, 1, 1, 1]])),
                ('L', Footprint::from([[1, 0], [1, 0], [1, 0], [1, 1]])),
                ('N', Footprint::from([[0, 1], [0, 1], [1, 1], [1, 0]])),
                ('P', Footprint::from([[1, 1], [1, 1], [1, 0]])),
                ('T', Footprint::from([[1, 1, 1], [0, 1, 0], [0, 1, 0]])),
                ('U', Footprint::from([[1, 0, 1], [1, 1, 1]])),
                ('V', Footprint::from([[1, 0, 0], [1, 0, 0], [1, 1, 1]])),
                ('W', Footprint::from([[1, 0, 0], [1, 1, 0], [0, 1, 1]])),
                ('X', Footprint::from([[0, 1, 0], [1, 1, 1], [0, 1, 0]])),
                ('Y', Footprint::from([[0, 1], [1, 1], [0, 1], [0, 1]])),
                ('Z', Footprint::from([[1, 1, 0], [0, 1, 0], [0, 1, 1]])),
            ],
            ShapeTransform::FullSymmetry,
        )
    }

    /// Return an iterator over the identifiers of all shapes in the catalog.
    pub fn shape_ids(&self) -> impl Iterator<Item = char> + '_ {
        self.shapes.keys().copied()
    }
}

impl ShapeCatalog for Catalog {
    fn mutations(&self, shape: char) -> Option<&[Footprint]> {
        self.shapes.get(&shape).map(Vec::as_slice)
    }

    fn cell_area(&self) -> usize {
        self.cell_area
    }
}

/// Return the process-wide pentomino catalog.
///
/// The table is built on first use and never mutated afterwards.
pub fn pentominoes() -> &'static Catalog {
    static PENTOMINOES: OnceLock<Catalog> = OnceLock::new();

    PENTOMINOES.get_or_init(Catalog::pentominoes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_footprint_no_trim() {
        let footprint = Footprint::from([[0, 0, 1], [1, 1, 1]]);
        assert_eq!(footprint.width(), 3);
        assert_eq!(footprint.height(), 2);
        assert_eq!(footprint.cell_area(), 4);
    }

    #[test]
    #[should_panic(expected = "Width of footprint must be non-zero.")]
    fn new_footprint_zero_width() {
        let _footprint = Footprint::new(0, vec![]);
    }

    #[test]
    #[should_panic(expected = "Mask with incorrect length")]
    fn new_footprint_incorrect_mask_length() {
        let _footprint = Footprint::new(2, vec![true, false, true]);
    }

    #[test]
    #[should_panic(expected = "footprint mask empty")]
    fn new_footprint_only_empty_cells() {
        let _footprint = Footprint::from([[0, 0, 0], [0, 0, 0]]);
    }

    #[test]
    fn new_footprint_trims_every_side() {
        let footprint = Footprint::from([
            [0, 0, 0, 0, 0],
            [0, 1, 0, 1, 0],
            [0, 0, 1, 0, 0],
            [0, 1, 0, 1, 0],
            [0, 0, 0, 0, 0],
        ]);
        assert_eq!(footprint, Footprint::from([[1, 0, 1], [0, 1, 0], [1, 0, 1]]));
    }

    #[test]
    fn footprint_cells_are_row_major() {
        let footprint = Footprint::from([[1, 0, 1], [1, 1, 1]]);
        assert_eq!(
            footprint.cells().collect::<Vec<_>>(),
            vec![(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
        assert!(footprint.is_filled(0, 0));
        assert!(!footprint.is_filled(0, 1));
        assert!(!footprint.is_filled(0, 3));
        assert!(!footprint.is_filled(2, 0));
    }

    #[test]
    fn rotate_quarter_turn() {
        let shape = Footprint::from([[1, 0, 0], [1, 1, 1]]);
        assert_eq!(shape.rotate(), Footprint::from([[1, 1], [1, 0], [1, 0]]));
        assert_eq!(shape.rotate().rotate().rotate().rotate(), shape);
    }

    #[test]
    fn reflect_top_to_bottom() {
        let shape = Footprint::from([[1, 0, 0], [1, 1, 1]]);
        assert_eq!(shape.reflect(), Footprint::from([[1, 1, 1], [1, 0, 0]]));
    }

    #[test]
    fn mutations_respect_transform() {
        let shape = Footprint::from([[1, 0, 0], [1, 1, 1]]);
        assert_eq!(mutations_of(&shape, ShapeTransform::NoTransform).len(), 1);
        assert_eq!(mutations_of(&shape, ShapeTransform::PureRotation).len(), 4);
        assert_eq!(mutations_of(&shape, ShapeTransform::FullSymmetry).len(), 8);

        let square = Footprint::from([[1, 1], [1, 1]]);
        assert_eq!(mutations_of(&square, ShapeTransform::FullSymmetry), vec![square]);
    }

    #[test]
    fn pentomino_mutation_counts() {
        let catalog = pentominoes();
        let counts: Vec<_> = "FILNPTUVWXYZ"
            .chars()
            .map(|id| catalog.mutations(id).map(<[Footprint]>::len))
            .collect();

        assert_eq!(
            counts,
            [8, 2, 8, 8, 8, 4, 4, 4, 4, 1, 8, 4]
                .into_iter()
                .map(Some)
                .collect::<Vec<_>>()
        );
        assert_eq!(catalog.cell_area(), 5);
        assert_eq!(catalog.shape_ids().count(), 12);
        assert!(catalog.mutations('Q').is_none());
    }

    #[test]
    fn pentomino_mutations_have_no_empty_border() {
        for id in pentominoes().shape_ids() {
            for footprint in pentominoes().mutations(id).unwrap_or_default() {
                assert_eq!(footprint.cell_area(), 5);
                for r in 0..footprint.height() {
                    assert!((0..footprint.width()).any(|c| footprint.is_filled(r, c)));
                }
                for c in 0..footprint.width() {
                    assert!((0..footprint.height()).any(|r| footprint.is_filled(r, c)));
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "must cover the same number of cells")]
    fn catalog_rejects_mixed_areas() {
        let _catalog = Catalog::from_shapes(
            [
                ('A', Footprint::from([[1, 1]])),
                ('B', Footprint::from([[1, 1, 1]])),
            ],
            ShapeTransform::NoTransform,
        );
    }

    #[test]
    fn resolve_rejects_overflowing_dimensions() {
        for (width, height) in [(usize::MAX, 2), (2, usize::MAX), (usize::MAX, usize::MAX)] {
            assert_eq!(
                resolve_instances(pentominoes(), width, height, &['I']),
                Err(TilingError::InvalidDimensions {
                    width,
                    height,
                    cell_area: 5
                })
            );
        }
    }

    #[test]
    fn resolve_looks_up_every_instance() {
        let mutations = resolve_instances(pentominoes(), 5, 2, &['I', 'X']).unwrap();

        assert_eq!(mutations.len(), 2);
        assert_eq!(mutations[0].len(), 2);
        assert_eq!(mutations[1].len(), 1);
        assert_eq!(
            resolve_instances(pentominoes(), 5, 2, &['I', 'q']),
            Err(TilingError::UnknownShape('q'))
        );
    }
}
