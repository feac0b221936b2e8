use rand::Rng;
use serde::{Serialize, Deserialize};

/// Dense row-major matrix.
///
/// Weight matrices use `rows` = destination neurons and `cols` = source
/// neurons, so `data[dst][src]` is the weight of the connection src -> dst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Every entry drawn independently and uniformly from [-1, 1).
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = uniform_signed(rng);
            }
        }

        res
    }

    /// Builds a matrix from row vectors. Returns `None` if the rows are ragged.
    pub fn from_data(data: Vec<Vec<f64>>) -> Option<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        if data.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Matrix { rows, cols, data })
    }

    /// `selfᵀ * v`: for every column j, `sum_i data[i][j] * v[i]`.
    pub fn transpose_mul_vec(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.rows);
        let mut res = vec![0.0; self.cols];
        for (row, &scale) in self.data.iter().zip(v) {
            for (acc, w) in res.iter_mut().zip(row) {
                *acc += w * scale;
            }
        }
        res
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Returns `false` without writing if the position is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> bool {
        match self.data.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// Uniform sample in [-1, 1).
pub fn uniform_signed<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>() * 2.0 - 1.0
}
