//! The built-in functions available in expressions.
//!
//! Every function takes a single scalar operand. Evaluation goes through complex arithmetic so
//! that inputs outside a function's real domain (such as `sqrt(-4)` or `ln(-1)`) produce complex
//! results instead of NaN; results with a zero imaginary part are demoted back to real scalars.

use num_complex::Complex64;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use crate::value::{demote, Value};

/// A built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Ln,
    Log,
    Sqrt,
    Abs,
    Conj,
}

/// All built-in functions, keyed by the name they are called with.
pub static ALL: Lazy<HashMap<&'static str, Func>> = Lazy::new(|| {
    HashMap::from([
        ("sin", Func::Sin),
        ("cos", Func::Cos),
        ("tan", Func::Tan),
        ("asin", Func::Asin),
        ("acos", Func::Acos),
        ("atan", Func::Atan),
        ("ln", Func::Ln),
        ("log", Func::Log),
        ("sqrt", Func::Sqrt),
        ("abs", Func::Abs),
        ("conj", Func::Conj),
    ])
});

impl Func {
    /// Looks up a built-in function by name.
    pub fn from_name(name: &str) -> Option<Func> {
        ALL.get(name).copied()
    }

    /// Returns the name this function is called with.
    pub fn name(&self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Ln => "ln",
            Func::Log => "log",
            Func::Sqrt => "sqrt",
            Func::Abs => "abs",
            Func::Conj => "conj",
        }
    }

    /// Evaluates the function at the given scalar operand.
    pub fn eval(&self, operand: Complex64) -> Value {
        // complex asin/acos/ln leave a rounding-error imaginary residue even for real operands,
        // so real operands inside the function's real domain stay on the real axis
        if operand.im == 0.0 {
            if let Some(n) = self.eval_real(operand.re) {
                return Value::Real(n);
            }
        }

        demote(match self {
            Func::Sin => operand.sin(),
            Func::Cos => operand.cos(),
            Func::Tan => operand.tan(),
            Func::Asin => operand.asin(),
            Func::Acos => operand.acos(),
            Func::Atan => operand.atan(),
            Func::Ln => operand.ln(),
            Func::Log => operand.log(10.0),
            Func::Sqrt => operand.sqrt(),
            Func::Abs => Complex64::new(operand.norm(), 0.0),
            Func::Conj => operand.conj(),
        })
    }

    /// Evaluates the function over `f64`, when the operand is inside its real domain.
    fn eval_real(&self, x: f64) -> Option<f64> {
        Some(match self {
            Func::Sin => x.sin(),
            Func::Cos => x.cos(),
            Func::Tan => x.tan(),
            Func::Asin if (-1.0..=1.0).contains(&x) => x.asin(),
            Func::Acos if (-1.0..=1.0).contains(&x) => x.acos(),
            Func::Atan => x.atan(),
            Func::Ln if x > 0.0 => x.ln(),
            Func::Log if x > 0.0 => x.log10(),
            Func::Sqrt if x >= 0.0 => x.sqrt(),
            Func::Abs => x.abs(),
            Func::Conj => x,
            _ => return None,
        })
    }
}

impl Display for Func {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use super::*;

    fn real(n: f64) -> Complex64 {
        Complex64::new(n, 0.0)
    }

    #[test]
    fn real_domain() {
        let Value::Real(sin) = Func::Sin.eval(real(std::f64::consts::FRAC_PI_2)) else {
            panic!("sin of a real stays real");
        };
        assert_float_absolute_eq!(sin, 1.0, 1e-12);

        assert_eq!(Func::Abs.eval(real(-3.0)), Value::Real(3.0));
    }

    #[test]
    fn complex_escape() {
        let Value::Complex(root) = Func::Sqrt.eval(real(-4.0)) else {
            panic!("sqrt of a negative real is complex");
        };
        assert_float_absolute_eq!(root.re, 0.0, 1e-12);
        assert_float_absolute_eq!(root.im, 2.0, 1e-12);

        assert!(matches!(Func::Asin.eval(real(2.0)), Value::Complex(_)));
        assert!(matches!(Func::Ln.eval(real(-1.0)), Value::Complex(_)));
    }

    #[test]
    fn inverse_trig_stays_real_in_domain() {
        let Value::Real(n) = Func::Asin.eval(real(0.2500005)) else {
            panic!("asin of an in-domain real stays real");
        };
        assert_float_absolute_eq!(n, 0.2500005_f64.asin(), 1e-12);

        assert!(matches!(Func::Acos.eval(real(-0.7)), Value::Real(_)));
        assert!(matches!(Func::Acos.eval(real(1.0)), Value::Real(_)));
        assert!(matches!(Func::Ln.eval(real(0.5)), Value::Real(_)));
    }

    #[test]
    fn conj() {
        assert_eq!(Func::Conj.eval(Complex64::new(1.0, 2.0)), Value::Complex(Complex64::new(1.0, -2.0)));
        assert_eq!(Func::Conj.eval(real(5.0)), Value::Real(5.0));
    }
}
