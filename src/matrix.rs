//! Sparse and dense storage for the raw feature matrix.
use ndarray::Array2;
use rayon::prelude::*;


/// Non-zero density above which the matrix is densified once at
/// load time. Anything at or below the threshold stays sparse.
pub(crate) const DENSITY_THRESHOLD: f64 = 0.1;


/// A row-oriented sparse matrix in compressed sparse row layout.
///
/// Row `i` owns the column indices `indices[indptr[i]..indptr[i + 1]]`
/// and the matching entries of `values`. The shape is fixed at
/// construction and never mutated afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
    n_col: usize,
}


impl CsrMatrix {
    /// Build a matrix from per-row `(column, value)` pairs.
    pub fn from_rows(rows: Vec<Vec<(usize, f64)>>, n_col: usize) -> Self {
        let nnz = rows.iter().map(Vec::len).sum();

        let mut indptr = Vec::with_capacity(rows.len() + 1);
        let mut indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        indptr.push(0);
        for row in rows {
            for (col, val) in row {
                debug_assert!(col < n_col);
                indices.push(col);
                values.push(val);
            }
            indptr.push(indices.len());
        }

        Self { indptr, indices, values, n_col }
    }


    /// Number of rows (records).
    pub fn n_row(&self) -> usize {
        self.indptr.len() - 1
    }


    /// Number of columns (features).
    pub fn n_col(&self) -> usize {
        self.n_col
    }


    /// The pair `(n_row, n_col)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_row(), self.n_col)
    }


    /// Number of stored non-zero entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }


    /// Fraction of stored entries over the full `n_row × n_col` shape.
    /// An empty shape has density `0`.
    pub fn density(&self) -> f64 {
        let cells = self.n_row() * self.n_col;
        if cells == 0 {
            return 0.0;
        }
        self.nnz() as f64 / cells as f64
    }


    /// The stored `(column, value)` pairs of row `i`.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let lo = self.indptr[i];
        let hi = self.indptr[i + 1];
        self.indices[lo..hi].iter()
            .copied()
            .zip(self.values[lo..hi].iter().copied())
    }


    /// Row `i` as a flat dense vector.
    pub fn row_dense(&self, i: usize) -> Vec<f32> {
        let mut row = vec![0.0_f32; self.n_col];
        for (col, val) in self.row(i) {
            row[col] = val as f32;
        }
        row
    }


    /// Materialize every row into a dense array.
    fn to_dense(&self) -> Array2<f32> {
        let n_row = self.n_row();

        let rows = (0..n_row).into_par_iter()
            .map(|i| self.row_dense(i))
            .collect::<Vec<_>>();

        let mut flat = Vec::with_capacity(n_row * self.n_col);
        for row in rows {
            flat.extend(row);
        }

        Array2::from_shape_vec((n_row, self.n_col), flat)
            .expect("row materialization must match the matrix shape")
    }
}


/// Feature storage, selected once at load time and fixed for the
/// lifetime of the dataset.
#[derive(Debug, Clone)]
pub enum FeatureMatrix {
    /// Low-density storage; rows are densified one at a time on access.
    Sparse(CsrMatrix),
    /// Pre-densified storage for dense-ish data,
    /// where one up-front conversion is cheaper than converting
    /// every row on every access.
    Dense(Array2<f32>),
}


impl FeatureMatrix {
    /// Decide the representation for `matrix` from its non-zero
    /// density. Densities strictly above `0.1` are densified;
    /// everything else keeps the sparse structure.
    pub fn select(matrix: CsrMatrix) -> Self {
        if matrix.density() > DENSITY_THRESHOLD {
            Self::Dense(matrix.to_dense())
        } else {
            Self::Sparse(matrix)
        }
    }


    /// The pair `(n_row, n_col)`.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Sparse(m) => m.shape(),
            Self::Dense(a) => (a.nrows(), a.ncols()),
        }
    }


    /// Returns `true` if the sparse structure was retained.
    pub fn is_sparse(&self) -> bool {
        matches!(self, Self::Sparse(_))
    }


    /// Row `index` as a flat dense vector.
    pub fn row(&self, index: usize) -> Vec<f32> {
        match self {
            Self::Sparse(m) => m.row_dense(index),
            Self::Dense(a) => a.row(index).to_vec(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn one_by_ten(nnz: usize) -> CsrMatrix {
        let row = (0..nnz).map(|c| (c, 1.0)).collect::<Vec<_>>();
        CsrMatrix::from_rows(vec![row], 10)
    }


    #[test]
    fn density_at_boundary_stays_sparse() {
        // 1 of 10 cells: density exactly 0.1.
        let matrix = one_by_ten(1);
        assert_eq!(matrix.density(), 0.1);
        assert!(FeatureMatrix::select(matrix).is_sparse());
    }


    #[test]
    fn density_above_boundary_goes_dense() {
        // 2 of 10 cells: density 0.2.
        let matrix = one_by_ten(2);
        assert!(!FeatureMatrix::select(matrix).is_sparse());
    }


    #[test]
    fn density_below_boundary_stays_sparse() {
        // 1 of 20 cells: density 0.05.
        let row = vec![(0, 1.0)];
        let matrix = CsrMatrix::from_rows(vec![row, Vec::new()], 10);
        assert_eq!(matrix.density(), 0.05);
        assert!(FeatureMatrix::select(matrix).is_sparse());
    }


    #[test]
    fn dense_and_sparse_rows_agree() {
        let rows = vec![
            vec![(1, 1.5), (3, 2.0)],
            Vec::new(),
            vec![(0, -1.0), (4, 0.25)],
        ];
        let matrix = CsrMatrix::from_rows(rows, 5);

        let sparse = FeatureMatrix::Sparse(matrix.clone());
        let dense = FeatureMatrix::Dense(matrix.to_dense());

        for i in 0..3 {
            assert_eq!(sparse.row(i), dense.row(i));
        }
        assert_eq!(sparse.row(0), vec![0.0, 1.5, 0.0, 2.0, 0.0]);
    }


    #[test]
    fn empty_matrix_density_is_zero() {
        let matrix = CsrMatrix::from_rows(Vec::new(), 0);
        assert_eq!(matrix.density(), 0.0);
        assert_eq!(matrix.shape(), (0, 0));
    }
}
