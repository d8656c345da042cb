//! SparseVector construction and conversion: coordinates, mappings, dense, CSC

use super::SparseVector;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::sparse::csc::CscMatrix;
use crate::sparse::format::SparseRead;

impl<T: Element> SparseVector<T> {
    /// Build from unsorted coordinates, combining duplicates with the default combine
    ///
    /// Duplicates are summed (logical-or for `bool`). See
    /// [`from_coo_with`](Self::from_coo_with) for the full contract.
    ///
    /// # Errors
    ///
    /// As [`from_coo_with`](Self::from_coo_with), plus `Overflow` if an
    /// integer sum of duplicates leaves the range of `T`.
    pub fn from_coo(indices: &[i64], values: &[T], len: Option<i64>) -> Result<Self> {
        Self::build_from_coo(indices, values, len, |a: T, b: T| {
            a.combine_duplicate(b)
                .ok_or(Error::Overflow { op: "combine duplicates" })
        })
    }

    /// Build from unsorted coordinates with an explicit duplicate combine
    ///
    /// # Arguments
    ///
    /// * `indices` - 0-based positions, in any order, duplicates allowed
    /// * `values` - Values paired with `indices`
    /// * `len` - Declared length; `None` uses the largest index plus one
    /// * `combine` - Folds the values of equal indices, in input order
    ///
    /// # Algorithm
    ///
    /// 1. Validate every index
    /// 2. Stable sort of a permutation by index
    /// 3. Linear scan folding consecutive equal indices with `combine`
    ///
    /// Combined results are stored even when they are zero.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the counts differ, `len` is negative, any index is
    /// negative, or any index is `>= len` when `len` is given.
    pub fn from_coo_with<F>(
        indices: &[i64],
        values: &[T],
        len: Option<i64>,
        combine: F,
    ) -> Result<Self>
    where
        F: Fn(T, T) -> T,
    {
        Self::build_from_coo(indices, values, len, |a: T, b: T| Ok(combine(a, b)))
    }

    fn build_from_coo<F>(
        indices: &[i64],
        values: &[T],
        len: Option<i64>,
        combine: F,
    ) -> Result<Self>
    where
        F: Fn(T, T) -> Result<T>,
    {
        if indices.len() != values.len() {
            return Err(Error::invalid_argument(
                "indices",
                format!(
                    "index count {} does not match value count {}",
                    indices.len(),
                    values.len()
                ),
            ));
        }

        if let Some(&bad) = indices.iter().find(|&&i| i < 0) {
            return Err(Error::invalid_argument(
                "indices",
                format!("negative index {}", bad),
            ));
        }

        let n = match len {
            Some(n) if n < 0 => {
                return Err(Error::invalid_argument(
                    "len",
                    format!("negative length {}", n),
                ));
            }
            Some(n) => {
                if let Some(&bad) = indices.iter().find(|&&i| i >= n) {
                    return Err(Error::invalid_argument(
                        "indices",
                        format!("index {} out of range for length {}", bad, n),
                    ));
                }
                n as usize
            }
            None => indices.iter().max().map_or(0, |&m| m as usize + 1),
        };

        let nnz = indices.len();
        if nnz == 0 {
            return Ok(Self::zeros(n));
        }

        // Stable, so duplicates fold in input order
        let mut perm: Vec<usize> = (0..nnz).collect();
        perm.sort_by_key(|&k| indices[k]);

        let mut nzind: Vec<usize> = Vec::with_capacity(nnz);
        let mut nzval: Vec<T> = Vec::with_capacity(nnz);
        let mut duplicates = 0usize;

        for &k in &perm {
            let i = indices[k] as usize;
            if nzind.last() == Some(&i) {
                if let Some(acc) = nzval.last_mut() {
                    *acc = combine(*acc, values[k])?;
                }
                duplicates += 1;
            } else {
                nzind.push(i);
                nzval.push(values[k]);
            }
        }

        if duplicates > 0 {
            tracing::debug!(
                len = n,
                entries = nnz,
                duplicates,
                "combined duplicate coordinates"
            );
            nzind.shrink_to_fit();
            nzval.shrink_to_fit();
        }

        Ok(Self::from_parts_unchecked(n, nzind, nzval))
    }

    /// Build from a key-to-value mapping
    ///
    /// Accepts anything iterating `(&key, &value)` pairs, such as a
    /// `HashMap<i64, T>` or `BTreeMap<i64, T>`. Keys are positions;
    /// the validation rules of [`from_coo`](Self::from_coo) apply.
    pub fn from_map<'a, I>(entries: I, len: Option<i64>) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a i64, &'a T)>,
    {
        let (indices, values): (Vec<i64>, Vec<T>) =
            entries.into_iter().map(|(&i, &v)| (i, v)).unzip();
        Self::from_coo(&indices, &values, len)
    }

    /// Build from a dense slice, storing every nonzero element
    ///
    /// The working buffers start at `max(8, len / 8)` entries and double
    /// when full, then are trimmed to the stored count.
    pub fn from_dense(dense: &[T]) -> Self {
        let n = dense.len();
        let initial = (n / 8).max(8);
        let mut nzind: Vec<usize> = Vec::with_capacity(initial);
        let mut nzval: Vec<T> = Vec::with_capacity(initial);

        for (i, &v) in dense.iter().enumerate() {
            if v.is_zero() {
                continue;
            }
            if nzind.len() == nzind.capacity() {
                let grow = nzind.capacity().max(1);
                nzind.reserve_exact(grow);
                nzval.reserve_exact(grow);
            }
            nzind.push(i);
            nzval.push(v);
        }

        nzind.shrink_to_fit();
        nzval.shrink_to_fit();
        Self::from_parts_unchecked(n, nzind, nzval)
    }

    /// Materialize as a dense vector
    ///
    /// Unstored positions hold the additive identity; stored positions hold
    /// their stored value, explicit zeros included.
    pub fn to_dense(&self) -> Vec<T> {
        let mut dense = vec![T::zero(); self.n];
        for (&i, &v) in self.nzind.iter().zip(self.nzval.iter()) {
            dense[i] = v;
        }
        dense
    }

    /// Copy into a single-column CSC matrix of shape `[len, 1]`
    pub fn to_csc(&self) -> CscMatrix<T> {
        self.clone().into_csc()
    }

    /// Reinterpret as a single-column CSC matrix of shape `[len, 1]`
    ///
    /// Moves the index and value buffers; `col_ptrs` is `[0, nnz]`.
    pub fn into_csc(self) -> CscMatrix<T> {
        let nnz = self.nzind.len();
        CscMatrix::from_parts_unchecked(vec![0, nnz], self.nzind, self.nzval, [self.n, 1])
    }

    /// Copy the only column of a single-column CSC matrix
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` unless the matrix has exactly one column.
    pub fn try_from_csc(matrix: &CscMatrix<T>) -> Result<Self> {
        let [nrows, ncols] = matrix.shape();
        if ncols != 1 {
            return Err(Error::dimension_mismatch(&[nrows, 1], &[nrows, ncols]));
        }
        let col = matrix.column(0)?;
        Ok(Self::from_parts_unchecked(
            nrows,
            col.indices().to_vec(),
            col.values().to_vec(),
        ))
    }
}

impl<T: Element> From<&[T]> for SparseVector<T> {
    fn from(dense: &[T]) -> Self {
        Self::from_dense(dense)
    }
}

impl<T: Element> From<Vec<T>> for SparseVector<T> {
    fn from(dense: Vec<T>) -> Self {
        Self::from_dense(&dense)
    }
}
