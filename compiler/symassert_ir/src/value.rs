//! Exact constant values.
//!
//! Constants are kept at arbitrary precision: integers as `BigInt`, floats
//! as exact rationals, complex numbers as a pair of rationals. Comparison
//! promotes between numeric representations (int, float, complex) without
//! rounding, so `1`, `1.0` and `(1 + 0i)` are the same value.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Value of a constant declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstValue {
    Bool(bool),
    Str(String),
    Int(BigInt),
    Float(BigRational),
    Complex { re: BigRational, im: BigRational },
}

impl ConstValue {
    /// Create an integer constant.
    pub fn int(value: impl Into<BigInt>) -> Self {
        ConstValue::Int(value.into())
    }

    /// Create a float constant from an exact ratio `numer / denom`.
    ///
    /// Returns `None` if `denom` is zero.
    pub fn ratio(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Option<Self> {
        let denom = denom.into();
        if denom.is_zero() {
            return None;
        }
        Some(ConstValue::Float(BigRational::new(numer.into(), denom)))
    }

    /// Create a complex constant from its parts.
    pub fn complex(re: BigRational, im: BigRational) -> Self {
        ConstValue::Complex { re, im }
    }

    /// Parse an integer literal (decimal, or `0x`/`0o`/`0b` prefixed).
    ///
    /// Underscore digit separators are accepted.
    pub fn parse_int(literal: &str) -> Option<Self> {
        let (negative, body) = split_sign(literal.trim());
        let body: String = body.chars().filter(|&c| c != '_').collect();
        let (radix, digits) = match body.get(..2) {
            Some("0x" | "0X") => (16, &body[2..]),
            Some("0o" | "0O") => (8, &body[2..]),
            Some("0b" | "0B") => (2, &body[2..]),
            _ => (10, body.as_str()),
        };
        if digits.is_empty() {
            return None;
        }
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix)?;
        Some(ConstValue::Int(if negative { -magnitude } else { magnitude }))
    }

    /// Parse a decimal floating point literal exactly (`1.25`, `-3e-2`, `.5`).
    pub fn parse_float(literal: &str) -> Option<Self> {
        let (negative, body) = split_sign(literal.trim());
        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(at) => (&body[..at], body[at + 1..].parse::<i32>().ok()?),
            None => (body, 0),
        };
        if exponent.unsigned_abs() > MAX_FLOAT_EXPONENT {
            return None;
        }
        let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return None;
        }

        let digits = format!("{whole}{frac}");
        let mut numer = BigInt::parse_bytes(digits.as_bytes(), 10)?;
        if negative {
            numer = -numer;
        }
        let frac_len = i64::try_from(frac.len()).ok()?;
        let scale = i64::from(exponent) - frac_len;
        let power = pow10(usize::try_from(scale.unsigned_abs()).ok()?);
        let value = if scale >= 0 {
            BigRational::from_integer(numer * power)
        } else {
            BigRational::new(numer, power)
        };
        Some(ConstValue::Float(value))
    }

    /// Compare two values exactly.
    ///
    /// Booleans and strings only equal values of the same representation.
    /// Numeric values are promoted to complex and compared component-wise.
    pub fn exact_eq(&self, other: &ConstValue) -> bool {
        match (self, other) {
            (ConstValue::Bool(a), ConstValue::Bool(b)) => a == b,
            (ConstValue::Str(a), ConstValue::Str(b)) => a == b,
            _ => match (self.as_complex(), other.as_complex()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    /// The value as `(re, im)`, if it is numeric.
    fn as_complex(&self) -> Option<(BigRational, BigRational)> {
        match self {
            ConstValue::Int(i) => Some((BigRational::from_integer(i.clone()), BigRational::zero())),
            ConstValue::Float(f) => Some((f.clone(), BigRational::zero())),
            ConstValue::Complex { re, im } => Some((re.clone(), im.clone())),
            ConstValue::Bool(_) | ConstValue::Str(_) => None,
        }
    }
}

impl From<bool> for ConstValue {
    fn from(value: bool) -> Self {
        ConstValue::Bool(value)
    }
}

impl From<&str> for ConstValue {
    fn from(value: &str) -> Self {
        ConstValue::Str(value.to_owned())
    }
}

impl From<i64> for ConstValue {
    fn from(value: i64) -> Self {
        ConstValue::Int(BigInt::from(value))
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Bool(b) => write!(f, "{b}"),
            ConstValue::Str(s) => write!(f, "{s:?}"),
            ConstValue::Int(i) => write!(f, "{i}"),
            ConstValue::Float(r) => fmt_rational(r, f),
            ConstValue::Complex { re, im } => {
                f.write_str("(")?;
                fmt_rational(re, f)?;
                f.write_str(" + ")?;
                fmt_rational(im, f)?;
                f.write_str("i)")
            }
        }
    }
}

fn split_sign(literal: &str) -> (bool, &str) {
    if let Some(rest) = literal.strip_prefix('-') {
        (true, rest)
    } else {
        (false, literal.strip_prefix('+').unwrap_or(literal))
    }
}

/// Largest decimal exponent accepted by `parse_float`; the exact value of
/// `1e<exp>` has `exp` digits.
const MAX_FLOAT_EXPONENT: u32 = 10_000;

fn pow10(exp: usize) -> BigInt {
    num_traits::pow(BigInt::from(10u32), exp)
}

/// Render a rational as an exact decimal when it has a finite expansion,
/// otherwise as `numer/denom`.
fn fmt_rational(r: &BigRational, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if r.is_integer() {
        return write!(f, "{}", r.numer());
    }

    let two = BigInt::from(2u32);
    let five = BigInt::from(5u32);
    let mut rest = r.denom().clone();
    let (mut twos, mut fives) = (0usize, 0usize);
    while (&rest % &two).is_zero() {
        rest /= &two;
        twos += 1;
    }
    while (&rest % &five).is_zero() {
        rest /= &five;
        fives += 1;
    }
    if !rest.is_one() {
        return write!(f, "{}/{}", r.numer(), r.denom());
    }

    let scale = twos.max(fives);
    let scaled = r.numer() * pow10(scale) / r.denom();
    let mut digits = scaled.magnitude().to_string();
    if digits.len() <= scale {
        digits = format!("{}{digits}", "0".repeat(scale + 1 - digits.len()));
    }
    let point = digits.len() - scale;
    let sign = if scaled.is_negative() { "-" } else { "" };
    write!(f, "{sign}{}.{}", &digits[..point], &digits[point..])
}
