//! Small typed helpers over strings and numbers
//!
//! All of these are total over their input types and have no side effects.

/// A number that is either an integer or a float
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Int(n.into())
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

/// `a` immediately followed by `b`
pub fn concat(a: &str, b: &str) -> String {
    let mut out = String::with_capacity(a.len() + b.len());
    out.push_str(a);
    out.push_str(b);
    out
}

/// Integer part of `n`, truncating toward zero
///
/// Out-of-range values saturate at `i64::MIN`/`i64::MAX`; NaN gives 0.
pub fn floor(n: f64) -> i64 {
    n.trunc() as i64
}

/// String form of `n` that parses back to the same value
///
/// Integral values keep their `.0` (`2.0` -> `"2.0"`).
pub fn to_str(n: f64) -> String {
    format!("{:?}", n)
}

/// Sum of the list; `0.0` when empty
pub fn sum_list(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Sum of a list mixing integers and floats; `0.0` when empty
pub fn sum_mixed_list(values: &[Number]) -> f64 {
    values.iter().map(|v| v.as_f64()).sum()
}

/// Pair `k` with the square of `v`
pub fn to_kv(k: &str, v: impl Into<Number>) -> (String, f64) {
    let v = v.into().as_f64();
    (k.to_string(), v * v)
}
