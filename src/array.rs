//! Support for numeric vectors and matrices and their shapes.
//!
//! Numeric data crosses the boundary as an [`NArray`]: a flat buffer of `f64` elements
//! together with a [`Shape`]. Matrix data is stored in row-major order and the shape is
//! preserved exactly when an array crosses the boundary in either direction.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::error::{AccessError, ConversionError, VelarsResult};

/// The shape of an [`NArray`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// A vector with the given number of elements.
    Vector(usize),
    /// A matrix with the given number of rows and columns.
    Matrix(usize, usize),
}

impl Shape {
    /// Returns the number of dimensions.
    pub fn rank(self) -> usize {
        match self {
            Shape::Vector(_) => 1,
            Shape::Matrix(_, _) => 2,
        }
    }

    /// The product of the number of elements of each dimension.
    pub fn size(self) -> usize {
        match self {
            Shape::Vector(n) => n,
            Shape::Matrix(rows, cols) => rows * cols,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Shape::Vector(n) => write!(f, "({},)", n),
            Shape::Matrix(rows, cols) => write!(f, "({}, {})", rows, cols),
        }
    }
}

/// A native numeric array with a fixed shape.
///
/// The element order of a matrix is row-major: element `(row, col)` is stored at index
/// `row * cols + col`.
#[derive(Clone, Debug, PartialEq)]
pub struct NArray {
    shape: Shape,
    data: Vec<f64>,
}

impl NArray {
    /// Create a vector from its elements.
    pub fn vector(data: Vec<f64>) -> Self {
        NArray {
            shape: Shape::Vector(data.len()),
            data,
        }
    }

    /// Create a matrix from its elements in row-major order.
    ///
    /// Returns a `ConversionError` if the number of elements does not match the shape.
    pub fn matrix(rows: usize, cols: usize, data: Vec<f64>) -> VelarsResult<Self> {
        if rows * cols != data.len() {
            Err(ConversionError::SizeMismatch {
                expected: rows * cols,
                got: data.len(),
            })?;
        }

        Ok(NArray {
            shape: Shape::Matrix(rows, cols),
            data,
        })
    }

    /// Create a matrix from a sequence of equally long rows.
    ///
    /// Returns a `ConversionError` if the rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> VelarsResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);

        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                Err(ConversionError::SizeMismatch {
                    expected: n_cols,
                    got: row.len(),
                })?;
            }
            data.extend_from_slice(&row);
        }

        NArray::matrix(n_rows, n_cols, data)
    }

    /// Returns the shape of this array.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if this array has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the elements in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutably view the elements in row-major order.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Returns the element at the given row and column.
    pub fn get(&self, row: usize, col: usize) -> VelarsResult<f64> {
        let idx = self.flat_index(row, col)?;
        Ok(self.data[idx])
    }

    /// Sets the element at the given row and column.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> VelarsResult<()> {
        let idx = self.flat_index(row, col)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Returns a transposed copy of this array. Transposing a vector returns the vector
    /// unchanged.
    pub fn transposed(&self) -> NArray {
        match self.shape {
            Shape::Vector(_) => self.clone(),
            Shape::Matrix(rows, cols) => {
                let mut data = Vec::with_capacity(self.data.len());
                for col in 0..cols {
                    for row in 0..rows {
                        data.push(self.data[row * cols + col]);
                    }
                }

                NArray {
                    shape: Shape::Matrix(cols, rows),
                    data,
                }
            }
        }
    }

    fn flat_index(&self, row: usize, col: usize) -> VelarsResult<usize> {
        match self.shape {
            Shape::Vector(n) => {
                if row != 0 || col >= n {
                    Err(AccessError::OutOfBounds { idx: col, len: n })?;
                }
                Ok(col)
            }
            Shape::Matrix(rows, cols) => {
                if row >= rows {
                    Err(AccessError::OutOfBounds {
                        idx: row,
                        len: rows,
                    })?;
                }
                if col >= cols {
                    Err(AccessError::OutOfBounds {
                        idx: col,
                        len: cols,
                    })?;
                }
                Ok(row * cols + col)
            }
        }
    }
}

/// A shared handle to an array that has crossed the boundary.
///
/// Cloning an `ArrayRef` clones the handle. All clones reference the same storage, so
/// mutation through one handle is visible through every other handle.
#[derive(Clone)]
pub struct ArrayRef {
    inner: Rc<RefCell<NArray>>,
}

impl ArrayRef {
    /// Move a native array into a shared handle.
    pub fn new(array: NArray) -> Self {
        ArrayRef {
            inner: Rc::new(RefCell::new(array)),
        }
    }

    /// Returns the shape of the referenced array.
    pub fn shape(&self) -> Shape {
        self.inner.borrow().shape()
    }

    /// Returns the number of elements of the referenced array.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns true if the referenced array has no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Returns the element at the given row and column.
    pub fn get(&self, row: usize, col: usize) -> VelarsResult<f64> {
        self.inner.borrow().get(row, col)
    }

    /// Sets the element at the given row and column.
    pub fn set(&self, row: usize, col: usize, value: f64) -> VelarsResult<()> {
        self.inner.borrow_mut().set(row, col, value)
    }

    /// Copy the referenced array back to a native `NArray`.
    pub fn to_narray(&self) -> NArray {
        self.inner.borrow().clone()
    }

    /// Returns true if `self` and `other` reference the same storage.
    pub fn same_storage(&self, other: &ArrayRef) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ArrayRef({:?})", self.inner.borrow())
    }
}

impl fmt::Display for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let array = self.inner.borrow();
        match array.shape() {
            Shape::Vector(_) => {
                f.write_str("[")?;
                for (i, v) in array.as_slice().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("]")
            }
            Shape::Matrix(rows, cols) => {
                f.write_str("[")?;
                for row in 0..rows {
                    if row > 0 {
                        f.write_str("; ")?;
                    }
                    for col in 0..cols {
                        if col > 0 {
                            f.write_str(" ")?;
                        }
                        write!(f, "{}", array.as_slice()[row * cols + col])?;
                    }
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_shape() {
        let v = NArray::vector(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.shape(), Shape::Vector(3));
        assert_eq!(v.shape().rank(), 1);
        assert_eq!(v.shape().size(), 3);
    }

    #[test]
    fn matrix_is_row_major() {
        let m = NArray::matrix(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.get(0, 2).unwrap(), 3.0);
        assert_eq!(m.get(1, 0).unwrap(), 4.0);
    }

    #[test]
    fn matrix_rejects_wrong_element_count() {
        assert!(NArray::matrix(2, 2, vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        assert!(NArray::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn from_rows_flattens_row_major() {
        let m = NArray::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.shape(), Shape::Matrix(2, 2));
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn transpose_swaps_shape_and_order() {
        let m = NArray::matrix(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = m.transposed();
        assert_eq!(t.shape(), Shape::Matrix(3, 2));
        assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn shared_handles_see_mutation() {
        let a = ArrayRef::new(NArray::matrix(2, 2, vec![0.0; 4]).unwrap());
        let b = a.clone();
        a.set(1, 1, 9.0).unwrap();
        assert_eq!(b.get(1, 1).unwrap(), 9.0);
        assert!(a.same_storage(&b));
    }
}
