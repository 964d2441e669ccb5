//! The named constants installed in every default evaluation context.

use num_complex::Complex64;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use crate::value::Value;

/// The imaginary unit.
pub static I: Lazy<Complex64> = Lazy::new(|| Complex64::new(0.0, 1.0));

/// Euler's number.
pub const E: f64 = std::f64::consts::E;

/// The golden ratio.
pub static PHI: Lazy<f64> = Lazy::new(|| (1.0 + 5.0_f64.sqrt()) / 2.0);

pub const PI: f64 = std::f64::consts::PI;

pub const TAU: f64 = std::f64::consts::TAU;

/// All named constants, keyed by the name they are bound to.
pub static ALL: Lazy<HashMap<&'static str, Value>> = Lazy::new(|| {
    HashMap::from([
        ("i", Value::Complex(*I)),
        ("e", Value::Real(E)),
        ("phi", Value::Real(*PHI)),
        ("pi", Value::Real(PI)),
        ("tau", Value::Real(TAU)),
    ])
});
