use super::solver::{DrudeLorentzSolver, FieldSolver, MediumSolver};
use crate::domain::{ErrorCode, FdtdError};
use crate::numerics::CartesianVector;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell ({i}, {j}, {k}) is outside grid {i_length}x{j_length}x{k_length}")]
    OutOfBounds {
        i: usize,
        j: usize,
        k: usize,
        i_length: usize,
        j_length: usize,
        k_length: usize,
    },
}

impl From<GridError> for FdtdError {
    fn from(error: GridError) -> Self {
        FdtdError::new(ErrorCode::GridIndex, error.to_string())
    }
}

/// Dimensions of a 3-D cell grid, flattened row-major (`k` fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStore {
    pub i_length: usize,
    pub j_length: usize,
    pub k_length: usize,
}

impl IndexStore {
    pub const fn new(i_length: usize, j_length: usize, k_length: usize) -> Self {
        Self {
            i_length,
            j_length,
            k_length,
        }
    }

    pub const fn len(&self) -> usize {
        self.i_length * self.j_length * self.k_length
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn contains(&self, i: usize, j: usize, k: usize) -> bool {
        i < self.i_length && j < self.j_length && k < self.k_length
    }

    pub const fn flatten(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.j_length + j) * self.k_length + k
    }

    pub const fn unflatten(&self, index: usize) -> (usize, usize, usize) {
        let k = index % self.k_length;
        let rest = index / self.k_length;
        (rest / self.j_length, rest % self.j_length, k)
    }

    /// Geometric centre in cell units, `(I/2, J/2, K/2)`.
    pub fn center(&self) -> CartesianVector {
        CartesianVector::new(
            self.i_length as f64 / 2.0,
            self.j_length as f64 / 2.0,
            self.k_length as f64 / 2.0,
        )
    }

    pub fn indices(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (0..self.len()).map(|index| self.unflatten(index))
    }

    fn out_of_bounds(&self, i: usize, j: usize, k: usize) -> GridError {
        GridError::OutOfBounds {
            i,
            j,
            k,
            i_length: self.i_length,
            j_length: self.j_length,
            k_length: self.k_length,
        }
    }
}

/// One medium solver per cell, stored flat.
///
/// Cells share nothing, so disjoint chunks of [`MediumGrid::cells_mut`] may
/// be stepped from different threads within one time step.
#[derive(Debug, Clone)]
pub struct MediumGrid {
    store: IndexStore,
    cells: Vec<MediumSolver>,
}

impl MediumGrid {
    pub fn from_fn(
        store: IndexStore,
        mut medium_at: impl FnMut(usize, usize, usize) -> MediumSolver,
    ) -> Self {
        let cells = store
            .indices()
            .map(|(i, j, k)| medium_at(i, j, k))
            .collect();
        Self { store, cells }
    }

    /// Cells within `radius` (cell units) of the grid centre get a copy of
    /// `body`, flagged as body; all others get `background`.
    pub fn sphere(
        store: IndexStore,
        radius: f64,
        body: &DrudeLorentzSolver,
        background: &MediumSolver,
    ) -> Self {
        let center = store.center();
        let grid = Self::from_fn(store, |i, j, k| {
            let point = CartesianVector::new(i as f64, j as f64, k as f64) - center;
            if point.norm() <= radius {
                MediumSolver::DrudeLorentz(body.clone().with_body(true))
            } else {
                background.clone()
            }
        });
        debug!(
            cells = grid.len(),
            body_cells = grid.body_cell_count(),
            radius,
            "medium grid built"
        );
        grid
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<&MediumSolver> {
        self.store
            .contains(i, j, k)
            .then(|| &self.cells[self.store.flatten(i, j, k)])
    }

    pub fn get_mut(&mut self, i: usize, j: usize, k: usize) -> Option<&mut MediumSolver> {
        if !self.store.contains(i, j, k) {
            return None;
        }
        let index = self.store.flatten(i, j, k);
        Some(&mut self.cells[index])
    }

    pub fn solve_at(
        &mut self,
        i: usize,
        j: usize,
        k: usize,
        displacement_field: CartesianVector,
    ) -> Result<CartesianVector, GridError> {
        let store = self.store;
        self.get_mut(i, j, k)
            .map(|cell| cell.solve(displacement_field))
            .ok_or_else(|| store.out_of_bounds(i, j, k))
    }

    pub fn cells(&self) -> &[MediumSolver] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [MediumSolver] {
        &mut self.cells
    }

    pub fn body_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_body()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::{GridError, IndexStore, MediumGrid};
    use crate::medium::{DrudeLorentzParameters, DrudeLorentzSolver, FieldSolver, MediumSolver};
    use crate::numerics::CartesianVector;

    #[test]
    fn flatten_round_trips_every_cell() {
        let store = IndexStore::new(3, 4, 5);
        assert_eq!(store.len(), 60);
        for (expected, (i, j, k)) in store.indices().enumerate() {
            assert_eq!(store.flatten(i, j, k), expected);
        }
        assert_eq!(store.unflatten(store.flatten(2, 3, 4)), (2, 3, 4));
        assert!(!store.contains(3, 0, 0));
    }

    #[test]
    fn sphere_marks_cells_within_radius() {
        let store = IndexStore::new(10, 10, 10);
        let body = DrudeLorentzSolver::new(&DrudeLorentzParameters::silver(), 1.0e-18);
        let grid = MediumGrid::sphere(store, 3.0, &body, &MediumSolver::vacuum());

        assert_eq!(grid.len(), 1_000);
        assert_eq!(grid.body_cell_count(), 123);
        assert!(grid.get(5, 5, 5).expect("centre").is_body());
        assert!(!grid.get(0, 0, 0).expect("corner").is_body());
        assert!(grid.get(10, 0, 0).is_none());
    }

    #[test]
    fn solve_at_reports_out_of_bounds() {
        let mut grid = MediumGrid::from_fn(IndexStore::new(2, 2, 2), |_, _, _| {
            MediumSolver::vacuum()
        });
        let d = CartesianVector::new(1.0, 2.0, 3.0);

        assert_eq!(grid.solve_at(1, 1, 1, d), Ok(d));
        assert_eq!(
            grid.solve_at(0, 2, 0, d),
            Err(GridError::OutOfBounds {
                i: 0,
                j: 2,
                k: 0,
                i_length: 2,
                j_length: 2,
                k_length: 2,
            })
        );
    }

    #[test]
    fn disjoint_cells_step_in_parallel_like_serial() {
        let store = IndexStore::new(6, 6, 6);
        let body = DrudeLorentzSolver::new(&DrudeLorentzParameters::silver(), 1.0e-18);
        let mut serial = MediumGrid::sphere(store, 2.0, &body, &MediumSolver::vacuum());
        let mut parallel = serial.clone();
        let drive = |step: usize| CartesianVector::new((step as f64 * 0.1).sin(), 0.5, 0.0);

        for step in 0..40 {
            for cell in serial.cells_mut() {
                cell.solve(drive(step));
            }
            std::thread::scope(|scope| {
                for chunk in parallel.cells_mut().chunks_mut(50) {
                    scope.spawn(move || {
                        for cell in chunk {
                            cell.solve(drive(step));
                        }
                    });
                }
            });
        }

        assert_eq!(serial.cells(), parallel.cells());
    }
}
