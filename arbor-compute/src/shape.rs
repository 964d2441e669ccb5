use std::fmt::{Display, Formatter};

/// The dimensionality of a value, computable without evaluating it.
///
/// A shape is an ordered list of dimensions: empty for a scalar, one entry for a vector length,
/// and two entries for matrix rows x columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// The shape of a scalar.
    pub fn scalar() -> Self {
        Self { dims: Vec::new() }
    }

    /// The shape of a vector with the given length.
    pub fn vector(len: usize) -> Self {
        Self { dims: vec![len] }
    }

    /// The shape of a matrix with the given dimensions.
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self { dims: vec![rows, cols] }
    }

    /// Returns the dimensions of this shape.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }

    pub fn is_vector(&self) -> bool {
        self.dims.len() == 1
    }

    pub fn is_matrix(&self) -> bool {
        self.dims.len() == 2
    }

    /// Returns the shape with its dimensions reversed, as produced by the transpose operator.
    pub fn transposed(&self) -> Shape {
        let mut dims = self.dims.clone();
        dims.reverse();
        Shape { dims }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.dims.as_slice() {
            [] => write!(f, "scalar"),
            [len] => write!(f, "[{}]", len),
            [rows, cols] => write!(f, "[{} x {}]", rows, cols),
            _ => unreachable!(),
        }
    }
}
