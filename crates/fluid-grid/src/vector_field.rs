//! Per-cell 4-vector of a numeric type, addressed by unit delta direction
//! (spec.md §4.2). Backed by a [`DynGrid`] of `[T; 4]`, since grid-size
//! dispatch above this interface is always the dynamically-sized path
//! (see `SPEC_FULL.md` §3).

use crate::direction::Direction;
use crate::grid::{DynGrid, GridStorage};

#[derive(Clone)]
pub struct VectorField<T> {
    cells: DynGrid<[T; 4]>,
}

impl<T: Default + Clone + Copy> VectorField<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: DynGrid::new(rows, cols),
        }
    }
}

impl<T: Clone + Copy> VectorField<T> {
    /// Build a field whose every component starts as a clone of `zero`.
    /// Use this instead of [`VectorField::new`] when `T::default()` can't
    /// be trusted to carry the right runtime kind (e.g. `fluid_numeric::Num`).
    pub fn filled(rows: usize, cols: usize, zero: T) -> Self {
        Self {
            cells: DynGrid::filled(rows, cols, [zero; 4]),
        }
    }
}

impl<T: Copy> VectorField<T> {
    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    /// Mutable handle to the component for `(dx, dy)` at `(x, y)`.
    ///
    /// Panics if `(dx, dy)` is not one of the four unit axis deltas.
    pub fn get_mut(&mut self, x: usize, y: usize, dx: i32, dy: i32) -> &mut T {
        let d = Direction::from_delta(dx, dy);
        &mut self.cells.get_mut(x, y)[d.index()]
    }

    pub fn get(&self, x: usize, y: usize, dx: i32, dy: i32) -> T {
        let d = Direction::from_delta(dx, dy);
        self.cells.get(x, y)[d.index()]
    }

    pub fn add(&mut self, x: usize, y: usize, dx: i32, dy: i32, dv: T)
    where
        T: std::ops::AddAssign,
    {
        *self.get_mut(x, y, dx, dy) += dv;
    }

    pub fn all(&self, x: usize, y: usize) -> [T; 4] {
        *self.cells.get(x, y)
    }

    pub fn set_all(&mut self, x: usize, y: usize, v: [T; 4]) {
        *self.cells.get_mut(x, y) = v;
    }

    pub fn clear(&mut self)
    where
        T: Default,
    {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_get_round_trips() {
        let mut vf: VectorField<f64> = VectorField::new(3, 3);
        vf.add(1, 1, -1, 0, 2.5);
        assert_eq!(vf.get(1, 1, -1, 0), 2.5);
        assert_eq!(vf.get(1, 1, 1, 0), 0.0);
    }

    #[test]
    #[should_panic(expected = "invalid direction delta")]
    fn rejects_bad_direction() {
        let mut vf: VectorField<f64> = VectorField::new(2, 2);
        vf.get_mut(0, 0, 1, 1);
    }

    #[test]
    fn clear_resets_all_components() {
        let mut vf: VectorField<f64> = VectorField::new(2, 2);
        vf.add(0, 0, 0, 1, 3.0);
        vf.clear();
        assert_eq!(vf.get(0, 0, 0, 1), 0.0);
    }
}
