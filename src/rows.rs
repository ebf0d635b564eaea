use nalgebra::{DMatrix, Scalar};
use ndarray::{Array2, Axis};

///
/// A dataset container that can materialize an owned minibatch from a
/// set of row indexes. Each row is one sample; the number of samples
/// is the number of rows.
///
pub trait RowChunks {
    type Batch;

    fn num_rows(&self) -> usize;

    /// Copy out the rows named by `rows`, in order. Indexes must be
    /// within `[0, num_rows)`.
    fn take_rows(&self, rows: &[usize]) -> Self::Batch;
}

impl<A: Clone> RowChunks for Array2<A> {
    type Batch = Array2<A>;

    fn num_rows(&self) -> usize {
        self.nrows()
    }

    fn take_rows(&self, rows: &[usize]) -> Self::Batch {
        self.select(Axis(0), rows)
    }
}

impl<T: Scalar> RowChunks for DMatrix<T> {
    type Batch = DMatrix<T>;

    fn num_rows(&self) -> usize {
        self.nrows()
    }

    fn take_rows(&self, rows: &[usize]) -> Self::Batch {
        self.select_rows(rows.iter())
    }
}

impl<T: Clone> RowChunks for Vec<T> {
    type Batch = Vec<T>;

    fn num_rows(&self) -> usize {
        self.len()
    }

    fn take_rows(&self, rows: &[usize]) -> Self::Batch {
        rows.iter().map(|&i| self[i].clone()).collect()
    }
}
