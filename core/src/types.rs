use ndarray::Array2;

/// Single coordinate axis, signed so off-grid pointer positions stay representable.
pub type Coord = i16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Callers must have checked that both axes are non-negative.
    fn to_nd_index(self) -> Self::Output {
        [self.0 as usize, self.1 as usize]
    }
}

/// Number of cells in a `a × b` area, negative axes count as empty.
pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = if a < 0 { 0 } else { a as CellCount };
    let b = if b < 0 { 0 } else { b as CellCount };
    a.saturating_mul(b)
}

pub const fn in_bounds((x, y): Coord2, (size_x, size_y): Coord2) -> bool {
    x >= 0 && x < size_x && y >= 0 && y < size_y
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let dim = self.dim();
        NeighborIter::new(index, (dim.0 as Coord, dim.1 as Coord))
    }
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Left, down, right, up. Flood reveal only ever walks these.
pub const ORTHOGONAL: [(Coord, Coord); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Applies `delta` to `coords` without any bounds check.
pub fn offset(coords: Coord2, delta: (Coord, Coord)) -> Option<Coord2> {
    Some((
        coords.0.checked_add(delta.0)?,
        coords.1.checked_add(delta.1)?,
    ))
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (Coord, Coord), bounds: Coord2) -> Option<Coord2> {
    offset(coords, delta).filter(|&next| in_bounds(next, bounds))
}

/// Iterates the in-bounds cells of the 8-neighbourhood around `center`.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
