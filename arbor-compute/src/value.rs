use num_complex::Complex64;
use std::fmt::{Display, Formatter};
use crate::{matrix::Matrix, shape::Shape};

/// Represents any value an expression can evaluate to.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A real scalar.
    Real(f64),

    /// A complex scalar.
    Complex(Complex64),

    /// An ordered sequence of values.
    ///
    /// After evaluation, the elements are always scalars, with one exception: a bracketed literal
    /// whose rows have unequal lengths stays a vector of vectors, since it cannot be promoted to
    /// a matrix.
    Vector(Vec<Value>),

    /// A dense rows x cols grid of scalars.
    Matrix(Matrix),
}

impl Value {
    /// Returns the typename of this value.
    pub fn typename(&self) -> &'static str {
        match self {
            Value::Real(_) => "Real",
            Value::Complex(_) => "Complex",
            Value::Vector(_) => "Vector",
            Value::Matrix(_) => "Matrix",
        }
    }

    /// Creates a vector value from the given elements, promoting it to a matrix when every
    /// element is a row of scalars and all rows have equal length.
    pub fn vector(elements: Vec<Value>) -> Self {
        let rows = elements.len();
        let cols = match elements.first() {
            Some(Value::Vector(row)) => row.len(),
            _ => return Value::Vector(elements),
        };

        let mut data = Vec::with_capacity(rows * cols);
        for element in &elements {
            let Value::Vector(row) = element else {
                return Value::Vector(elements);
            };
            if row.len() != cols {
                return Value::Vector(elements);
            }
            for entry in row {
                match entry.as_complex() {
                    Some(c) => data.push(c),
                    None => return Value::Vector(elements),
                }
            }
        }

        Value::Matrix(Matrix::new(rows, cols, data))
    }

    /// Consumes and attempts to coerce the value to a real scalar. The conversion only occurs if
    /// the value is a complex number with a zero imaginary part.
    pub fn coerce_real(self) -> Self {
        match self {
            Value::Complex(c) if c.im == 0.0 => Value::Real(c.re),
            _ => self,
        }
    }

    /// Consumes and attempts to coerce the value to a complex scalar. This coercion is lossless.
    pub fn coerce_complex(self) -> Self {
        match self {
            Value::Real(n) => Value::Complex(Complex64::new(n, 0.0)),
            _ => self,
        }
    }

    /// Returns the value as a real scalar, if it is one (or is a complex number with a zero
    /// imaginary part).
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(n) => Some(*n),
            Value::Complex(c) if c.im == 0.0 => Some(c.re),
            _ => None,
        }
    }

    /// Returns the value as a complex scalar, if it is a scalar.
    pub fn as_complex(&self) -> Option<Complex64> {
        match self {
            Value::Real(n) => Some(Complex64::new(*n, 0.0)),
            Value::Complex(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns true if this value is a scalar.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Real(_) | Value::Complex(_))
    }

    /// Returns true if this value is a scalar equal to the given real number.
    pub fn eq_real(&self, n: f64) -> bool {
        self.as_real() == Some(n)
    }

    /// Returns the shape of this value.
    pub fn shape(&self) -> Shape {
        match self {
            Value::Real(_) | Value::Complex(_) => Shape::scalar(),
            Value::Vector(elements) => {
                if let Some(Value::Vector(row)) = elements.first() {
                    let cols = row.len();
                    if elements.iter().all(|e| matches!(e, Value::Vector(r) if r.len() == cols)) {
                        return Shape::matrix(elements.len(), cols);
                    }
                }
                Shape::vector(elements.len())
            },
            Value::Matrix(m) => Shape::matrix(m.rows(), m.cols()),
        }
    }
}

/// Converts a complex scalar into a [`Value`], demoting it to a real scalar when the imaginary
/// part is zero.
pub(crate) fn demote(c: Complex64) -> Value {
    if c.im == 0.0 {
        Value::Real(c.re)
    } else {
        Value::Complex(c)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Real(n)
    }
}

impl From<Complex64> for Value {
    fn from(c: Complex64) -> Self {
        Value::Complex(c)
    }
}

impl From<Vec<Value>> for Value {
    fn from(elements: Vec<Value>) -> Self {
        Value::Vector(elements)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::Matrix(m)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Real(n) => write!(f, "{}", n),
            Value::Complex(c) => {
                if c.re == 0.0 {
                    write!(f, "{}i", c.im)
                } else if c.im < 0.0 {
                    write!(f, "{} - {}i", c.re, -c.im)
                } else {
                    write!(f, "{} + {}i", c.re, c.im)
                }
            },
            Value::Vector(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            },
            Value::Matrix(m) => write!(f, "{}", m),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn demote_zero_imaginary() {
        let product = Complex64::new(1.0, 2.0) * Complex64::new(1.0, -2.0);
        assert_eq!(demote(product), Value::Real(5.0));
    }

    #[test]
    fn rows_promote_to_matrix() {
        let rows = vec![
            Value::Vector(vec![Value::Real(1.0), Value::Real(2.0)]),
            Value::Vector(vec![Value::Real(3.0), Value::Real(4.0)]),
        ];
        assert_eq!(Value::vector(rows).shape(), Shape::matrix(2, 2));
    }

    #[test]
    fn ragged_rows_stay_a_vector() {
        let rows = vec![
            Value::Vector(vec![Value::Real(1.0), Value::Real(2.0)]),
            Value::Vector(vec![Value::Real(3.0)]),
        ];
        assert_eq!(Value::vector(rows).shape(), Shape::vector(2));
    }

    #[test]
    fn eq_real_sees_through_complex() {
        assert!(Value::Complex(Complex64::new(3.0, 0.0)).eq_real(3.0));
        assert!(!Value::Complex(Complex64::new(3.0, 1.0)).eq_real(3.0));
    }
}
