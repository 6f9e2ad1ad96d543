//! Operand promotion and binary arithmetic over pooled results.
//!
//! Operands of mixed kinds are promoted to the widest [`Rank`] among them,
//! each materialized in a handle checked out of the [`PoolContext`], and
//! combined in place. The result is a [`Value`] whose handle goes back to
//! its pool when dropped.

use std::cmp::Ordering;
use std::fmt;

use mpcache_pool::Pooled;
use rug::{Assign, Complex, Float, Integer, Rational};
use serde::{Deserialize, Serialize};

use crate::complex::{ComplexKind, ComplexPrecision};
use crate::context::PoolContext;
use crate::error::NumericError;
use crate::float::FloatKind;
use crate::integer::IntegerKind;
use crate::precision::Precision;
use crate::rational::RationalKind;

/// Numeric kinds ordered by promotion: integer < rational < float < complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    /// Arbitrary-precision integer.
    Integer,
    /// Exact rational.
    Rational,
    /// Multiple-precision float.
    Float,
    /// Multiple-precision complex.
    Complex,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Integer => "integer",
            Self::Rational => "rational",
            Self::Float => "float",
            Self::Complex => "complex",
        })
    }
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`; integer operands divide exactly into a rational.
    Div,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        })
    }
}

/// One side of a binary operation.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// Host integer.
    Int(i64),
    /// Host double.
    Double(f64),
    /// Borrowed integer.
    Integer(&'a Integer),
    /// Borrowed rational.
    Rational(&'a Rational),
    /// Borrowed float.
    Float(&'a Float),
    /// Borrowed complex.
    Complex(&'a Complex),
    /// Decimal literal: an integer, `a/b`, a float, or a complex `re+imj`.
    Text(&'a str),
}

impl Operand<'_> {
    /// Rank this operand promotes from.
    pub fn rank(&self) -> Result<Rank, NumericError> {
        match self {
            Self::Int(_) | Self::Integer(_) => Ok(Rank::Integer),
            Self::Rational(_) => Ok(Rank::Rational),
            Self::Double(_) | Self::Float(_) => Ok(Rank::Float),
            Self::Complex(_) => Ok(Rank::Complex),
            Self::Text(text) => Literal::parse(text).map(|literal| literal.rank()),
        }
    }
}

impl From<i64> for Operand<'_> {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl<'a> From<&'a Integer> for Operand<'a> {
    fn from(value: &'a Integer) -> Self {
        Self::Integer(value)
    }
}

impl<'a> From<&'a Rational> for Operand<'a> {
    fn from(value: &'a Rational) -> Self {
        Self::Rational(value)
    }
}

impl<'a> From<&'a Float> for Operand<'a> {
    fn from(value: &'a Float) -> Self {
        Self::Float(value)
    }
}

impl<'a> From<&'a Complex> for Operand<'a> {
    fn from(value: &'a Complex) -> Self {
        Self::Complex(value)
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

fn parse_error(text: &str) -> NumericError {
    NumericError::Parse(format!("{text:?}"))
}

/// A text literal parsed once, at the narrowest rank that accepts it.
enum Literal {
    Integer(rug::integer::ParseIncomplete),
    Rational(rug::rational::ParseIncomplete),
    Float(rug::float::ParseIncomplete),
    /// `re+imj`, `re-imj` or `imj`.
    Complex(rug::float::ParseIncomplete, rug::float::ParseIncomplete),
}

impl Literal {
    fn parse(text: &str) -> Result<Self, NumericError> {
        if let Ok(parsed) = Integer::parse(text) {
            return Ok(Self::Integer(parsed));
        }
        if let Ok(parsed) = Rational::parse(text) {
            return Ok(Self::Rational(parsed));
        }
        if let Ok(parsed) = Float::parse(text) {
            return Ok(Self::Float(parsed));
        }
        if let Some((re, im)) = split_complex(text) {
            if let (Ok(re), Ok(im)) = (Float::parse(re), Float::parse(im)) {
                return Ok(Self::Complex(re, im));
            }
        }
        Err(parse_error(text))
    }

    fn rank(&self) -> Rank {
        match self {
            Self::Integer(_) => Rank::Integer,
            Self::Rational(_) => Rank::Rational,
            Self::Float(_) => Rank::Float,
            Self::Complex(..) => Rank::Complex,
        }
    }
}

/// Split a `j`-suffixed literal into its real and imaginary text. A sign
/// directly after an exponent marker belongs to the exponent.
fn split_complex(text: &str) -> Option<(&str, &str)> {
    let body = text.trim().strip_suffix(['j', 'J'])?;
    let bytes = body.as_bytes();
    let split = (1..bytes.len())
        .filter(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'))
        .last();
    Some(match split {
        Some(i) => (&body[..i], &body[i..]),
        None => ("0", body),
    })
}

/// An operand with its text literal, if any, already parsed.
enum Source<'a> {
    Int(i64),
    Double(f64),
    Integer(&'a Integer),
    Rational(&'a Rational),
    Float(&'a Float),
    Complex(&'a Complex),
    Literal(Literal),
}

impl<'a> Source<'a> {
    fn resolve(operand: Operand<'a>) -> Result<Self, NumericError> {
        Ok(match operand {
            Operand::Int(v) => Self::Int(v),
            Operand::Double(v) => Self::Double(v),
            Operand::Integer(v) => Self::Integer(v),
            Operand::Rational(v) => Self::Rational(v),
            Operand::Float(v) => Self::Float(v),
            Operand::Complex(v) => Self::Complex(v),
            Operand::Text(text) => Self::Literal(Literal::parse(text)?),
        })
    }

    fn rank(&self) -> Rank {
        match self {
            Self::Int(_) | Self::Integer(_) => Rank::Integer,
            Self::Rational(_) => Rank::Rational,
            Self::Double(_) | Self::Float(_) => Rank::Float,
            Self::Complex(_) => Rank::Complex,
            Self::Literal(literal) => literal.rank(),
        }
    }

    fn precision(&self) -> Option<(u32, u32)> {
        match self {
            Self::Float(f) => Some((f.prec(), f.prec())),
            Self::Complex(c) => Some(c.prec()),
            _ => None,
        }
    }

    fn incompatible(&self, to: Rank) -> NumericError {
        NumericError::Incompatible {
            from: self.rank(),
            to,
        }
    }
}

/// A numeric result held in a pooled handle.
pub enum Value<'ctx> {
    /// Integer result.
    Integer(Pooled<'ctx, IntegerKind>),
    /// Rational result.
    Rational(Pooled<'ctx, RationalKind>),
    /// Float result.
    Float(Pooled<'ctx, FloatKind>),
    /// Complex result.
    Complex(Pooled<'ctx, ComplexKind>),
}

impl Value<'_> {
    /// Kind of the result.
    #[must_use]
    pub fn rank(&self) -> Rank {
        match self {
            Self::Integer(_) => Rank::Integer,
            Self::Rational(_) => Rank::Rational,
            Self::Float(_) => Rank::Float,
            Self::Complex(_) => Rank::Complex,
        }
    }

    /// Borrow the result as an operand of a further operation.
    #[must_use]
    pub fn as_operand(&self) -> Operand<'_> {
        match self {
            Self::Integer(v) => Operand::Integer(&**v),
            Self::Rational(v) => Operand::Rational(&**v),
            Self::Float(v) => Operand::Float(&**v),
            Self::Complex(v) => Operand::Complex(&**v),
        }
    }

    /// The integer, if this is an integer result.
    #[must_use]
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Integer(v) => Some(&**v),
            _ => None,
        }
    }

    /// The rational, if this is a rational result.
    #[must_use]
    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            Self::Rational(v) => Some(&**v),
            _ => None,
        }
    }

    /// The float, if this is a float result.
    #[must_use]
    pub fn as_float(&self) -> Option<&Float> {
        match self {
            Self::Float(v) => Some(&**v),
            _ => None,
        }
    }

    /// The complex number, if this is a complex result.
    #[must_use]
    pub fn as_complex(&self) -> Option<&Complex> {
        match self {
            Self::Complex(v) => Some(&**v),
            _ => None,
        }
    }

    fn combine(&mut self, op: BinaryOp, rhs: &Self) -> Result<(), NumericError> {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => match op {
                BinaryOp::Add => **a += &**b,
                BinaryOp::Sub => **a -= &**b,
                BinaryOp::Mul => **a *= &**b,
                // Exact quotients need a rational accumulator; `apply`
                // promotes before combining.
                BinaryOp::Div => {
                    return Err(NumericError::Incompatible {
                        from: Rank::Integer,
                        to: Rank::Rational,
                    })
                }
            },
            (Self::Rational(a), Self::Rational(b)) => match op {
                BinaryOp::Add => **a += &**b,
                BinaryOp::Sub => **a -= &**b,
                BinaryOp::Mul => **a *= &**b,
                BinaryOp::Div => {
                    if b.cmp0() == Ordering::Equal {
                        return Err(NumericError::DivisionByZero);
                    }
                    **a /= &**b;
                }
            },
            (Self::Float(a), Self::Float(b)) => match op {
                BinaryOp::Add => **a += &**b,
                BinaryOp::Sub => **a -= &**b,
                BinaryOp::Mul => **a *= &**b,
                BinaryOp::Div => **a /= &**b,
            },
            (Self::Complex(a), Self::Complex(b)) => match op {
                BinaryOp::Add => **a += &**b,
                BinaryOp::Sub => **a -= &**b,
                BinaryOp::Mul => **a *= &**b,
                BinaryOp::Div => **a /= &**b,
            },
            (lhs, rhs) => {
                return Err(NumericError::Incompatible {
                    from: rhs.rank(),
                    to: lhs.rank(),
                })
            }
        }
        Ok(())
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => fmt::Display::fmt(&**v, f),
            Self::Rational(v) => fmt::Display::fmt(&**v, f),
            Self::Float(v) => fmt::Display::fmt(&**v, f),
            Self::Complex(v) => fmt::Display::fmt(&**v, f),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value::{:?}({self})", self.rank())
    }
}

/// Compute `lhs op rhs` at the common rank of both operands.
///
/// Float and complex results carry the widest precision among the
/// operands, or the default precision when neither has one. Text operands
/// are parsed once.
pub fn apply<'ctx>(
    ctx: &'ctx PoolContext,
    op: BinaryOp,
    lhs: Operand<'_>,
    rhs: Operand<'_>,
) -> Result<Value<'ctx>, NumericError> {
    let lhs = Source::resolve(lhs)?;
    let rhs = Source::resolve(rhs)?;
    let mut rank = lhs.rank().max(rhs.rank());
    if op == BinaryOp::Div && rank == Rank::Integer {
        rank = Rank::Rational;
    }
    let prec = widest_precision(&lhs, &rhs);

    let mut acc = lift(ctx, lhs, rank, prec)?;
    let rhs = lift(ctx, rhs, rank, prec)?;
    acc.combine(op, &rhs)?;
    Ok(acc)
}

fn widest_precision(lhs: &Source<'_>, rhs: &Source<'_>) -> ComplexPrecision {
    match (lhs.precision(), rhs.precision()) {
        (None, None) => ComplexPrecision::default(),
        (Some(p), None) | (None, Some(p)) => p.into(),
        (Some((lr, li)), Some((rr, ri))) => (lr.max(rr), li.max(ri)).into(),
    }
}

/// Materialize `source` at `rank` in a pooled handle.
fn lift<'ctx>(
    ctx: &'ctx PoolContext,
    source: Source<'_>,
    rank: Rank,
    prec: ComplexPrecision,
) -> Result<Value<'ctx>, NumericError> {
    match rank {
        Rank::Integer => {
            let mut value = ctx.integers().checkout_default();
            assign_integer(&mut value, source)?;
            Ok(Value::Integer(value))
        }
        Rank::Rational => {
            let mut value = ctx.rationals().checkout_default();
            assign_rational(ctx, &mut value, source)?;
            Ok(Value::Rational(value))
        }
        Rank::Float => {
            let mut value = ctx.floats().checkout(prec.real)?;
            assign_float(ctx, &mut value, source)?;
            Ok(Value::Float(value))
        }
        Rank::Complex => {
            let mut value = ctx.complexes().checkout(prec)?;
            match source {
                Source::Complex(c) => value.assign(c),
                Source::Literal(Literal::Complex(re, im)) => {
                    value.mut_real().assign(re);
                    value.mut_imag().assign(im);
                }
                other => {
                    assign_float(ctx, value.mut_real(), other)?;
                    value.mut_imag().assign(0);
                }
            }
            Ok(Value::Complex(value))
        }
    }
}

fn assign_integer(dst: &mut Integer, source: Source<'_>) -> Result<(), NumericError> {
    match source {
        Source::Int(v) => dst.assign(v),
        Source::Integer(v) => dst.assign(v),
        Source::Literal(Literal::Integer(parsed)) => dst.assign(parsed),
        other => return Err(other.incompatible(Rank::Integer)),
    }
    Ok(())
}

fn assign_rational(
    ctx: &PoolContext,
    dst: &mut Rational,
    source: Source<'_>,
) -> Result<(), NumericError> {
    match source {
        Source::Int(v) => dst.assign(v),
        Source::Integer(v) => dst.assign(v),
        Source::Rational(v) => dst.assign(v),
        Source::Literal(Literal::Integer(parsed)) => {
            let mut exact = ctx.integers().checkout_default();
            exact.assign(parsed);
            dst.assign(&*exact);
        }
        Source::Literal(Literal::Rational(parsed)) => dst.assign(parsed),
        other => return Err(other.incompatible(Rank::Rational)),
    }
    Ok(())
}

fn assign_float(
    ctx: &PoolContext,
    dst: &mut Float,
    source: Source<'_>,
) -> Result<(), NumericError> {
    match source {
        Source::Int(v) => dst.assign(v),
        Source::Double(v) => dst.assign(v),
        Source::Integer(v) => dst.assign(v),
        Source::Rational(v) => dst.assign(v),
        Source::Float(v) => dst.assign(v),
        Source::Literal(Literal::Float(parsed)) => dst.assign(parsed),
        // Integer and `a/b` literals round once, from their exact value.
        Source::Literal(Literal::Integer(parsed)) => {
            let mut exact = ctx.integers().checkout_default();
            exact.assign(parsed);
            dst.assign(&*exact);
        }
        Source::Literal(Literal::Rational(parsed)) => {
            let mut exact = ctx.rationals().checkout_default();
            exact.assign(parsed);
            dst.assign(&*exact);
        }
        other => return Err(other.incompatible(Rank::Float)),
    }
    Ok(())
}

/// Precision hint matching an explicit bit count, `0` meaning default.
#[must_use]
pub fn precision_hint(bits: u32) -> ComplexPrecision {
    ComplexPrecision::uniform(Precision::from_bits(bits))
}

#[cfg(test)]
mod tests {
    use mpcache_pool::PoolConfig;

    use super::*;

    fn ctx() -> PoolContext {
        PoolContext::new(PoolConfig::new(4, 128).unwrap()).unwrap()
    }

    #[test]
    fn rank_ordering() {
        assert!(Rank::Integer < Rank::Rational);
        assert!(Rank::Rational < Rank::Float);
        assert!(Rank::Float < Rank::Complex);
    }

    #[test]
    fn text_ranks() {
        assert_eq!(Operand::Text("42").rank().unwrap(), Rank::Integer);
        assert_eq!(Operand::Text("-7/3").rank().unwrap(), Rank::Rational);
        assert_eq!(Operand::Text("2.5").rank().unwrap(), Rank::Float);
        assert!(matches!(
            Operand::Text("forty-two").rank(),
            Err(NumericError::Parse(_))
        ));
    }

    #[test]
    fn integer_arithmetic() {
        let ctx = ctx();
        let big = Integer::from(1) << 100u32;
        let sum = apply(&ctx, BinaryOp::Add, (&big).into(), 1i64.into()).unwrap();
        assert_eq!(sum.rank(), Rank::Integer);
        assert_eq!(sum.to_string(), "1267650600228229401496703205377");

        let product = apply(&ctx, BinaryOp::Mul, 6i64.into(), "7".into()).unwrap();
        assert_eq!(*product.as_integer().unwrap(), 42);
    }

    #[test]
    fn integer_division_is_exact_rational() {
        let ctx = ctx();
        let q = apply(&ctx, BinaryOp::Div, 1i64.into(), 3i64.into()).unwrap();
        assert_eq!(q.rank(), Rank::Rational);
        assert_eq!(q.to_string(), "1/3");
    }

    #[test]
    fn rational_text_promotes() {
        let ctx = ctx();
        let sum = apply(&ctx, BinaryOp::Add, "1/3".into(), 1i64.into()).unwrap();
        assert_eq!(sum.to_string(), "4/3");
    }

    #[test]
    fn float_promotion_uses_widest_precision() {
        let ctx = ctx();
        let narrow = Float::with_val(64, 1.5);
        let wide = Float::with_val(256, 2);
        let sum = apply(&ctx, BinaryOp::Add, (&narrow).into(), (&wide).into()).unwrap();
        let sum = sum.as_float().unwrap();
        assert_eq!(sum.prec(), 256);
        assert_eq!(*sum, 3.5);
    }

    #[test]
    fn rational_text_into_float() {
        let ctx = ctx();
        let value = apply(&ctx, BinaryOp::Mul, "1/4".into(), 2.0f64.into()).unwrap();
        assert_eq!(value.rank(), Rank::Float);
        assert_eq!(*value.as_float().unwrap(), 0.5);
    }

    #[test]
    fn complex_promotion() {
        let ctx = ctx();
        let z = Complex::with_val(53, (1, 2));
        let sum = apply(&ctx, BinaryOp::Add, (&z).into(), 3i64.into()).unwrap();
        let sum = sum.as_complex().unwrap();
        assert_eq!(*sum.real(), 4);
        assert_eq!(*sum.imag(), 2);
    }

    #[test]
    fn exact_division_by_zero() {
        let ctx = ctx();
        assert!(matches!(
            apply(&ctx, BinaryOp::Div, 1i64.into(), 0i64.into()),
            Err(NumericError::DivisionByZero)
        ));
        assert!(matches!(
            apply(&ctx, BinaryOp::Div, "1/2".into(), "0".into()),
            Err(NumericError::DivisionByZero)
        ));
    }

    #[test]
    fn float_division_by_zero_is_infinite() {
        let ctx = ctx();
        let value = apply(&ctx, BinaryOp::Div, 1.0f64.into(), 0i64.into()).unwrap();
        assert!(value.as_float().unwrap().is_infinite());
    }

    #[test]
    fn parse_error_reported() {
        let ctx = ctx();
        let err = apply(&ctx, BinaryOp::Add, "1x".into(), 1i64.into()).unwrap_err();
        assert!(matches!(err, NumericError::Parse(_)));
    }

    #[test]
    fn results_return_to_pool() {
        let ctx = ctx();
        ctx.reset_stats();
        {
            let value = apply(&ctx, BinaryOp::Sub, 10i64.into(), 4i64.into()).unwrap();
            assert_eq!(*value.as_integer().unwrap(), 6);
            // One slot holds the result; the right operand went back already.
            assert_eq!(ctx.integers().len(), 3);
        }
        assert_eq!(ctx.integers().len(), 4);
        assert_eq!(ctx.integers().stats().hits, 2);
    }

    #[test]
    fn chained_operations() {
        let ctx = ctx();
        let a = apply(&ctx, BinaryOp::Add, 2i64.into(), 3i64.into()).unwrap();
        let b = apply(&ctx, BinaryOp::Div, a.as_operand(), 2i64.into()).unwrap();
        assert_eq!(b.to_string(), "5/2");
        assert_eq!(format!("{b:?}"), "Value::Rational(5/2)");
    }

    #[test]
    fn complex_literals() {
        assert_eq!(Operand::Text("1+2j").rank().unwrap(), Rank::Complex);
        assert_eq!(split_complex("1.5-0.5j"), Some(("1.5", "-0.5")));
        assert_eq!(split_complex("-2j"), Some(("0", "-2")));
        assert_eq!(split_complex("1e-3+2E+4J"), Some(("1e-3", "+2E+4")));
        assert_eq!(split_complex("1.5"), None);

        let ctx = ctx();
        let z = apply(&ctx, BinaryOp::Add, "1.5+0.5j".into(), 1i64.into()).unwrap();
        let z = z.as_complex().unwrap();
        assert_eq!(*z.real(), 2.5);
        assert_eq!(*z.imag(), 0.5);

        let z = apply(&ctx, BinaryOp::Mul, "2j".into(), "3j".into()).unwrap();
        assert_eq!(*z.as_complex().unwrap().real(), -6);
        assert!(matches!(
            Operand::Text("1+j").rank(),
            Err(NumericError::Parse(_))
        ));
    }

    #[test]
    fn literals_parse_at_narrowest_rank() {
        assert!(matches!(Literal::parse("-12"), Ok(Literal::Integer(_))));
        assert!(matches!(Literal::parse("3/4"), Ok(Literal::Rational(_))));
        assert!(matches!(Literal::parse("1e3"), Ok(Literal::Float(_))));
        assert!(matches!(Literal::parse("1-1j"), Ok(Literal::Complex(..))));
        assert!(matches!(Literal::parse("3/0"), Err(NumericError::Parse(_))));
    }

    #[test]
    fn integer_literal_into_float_is_exact_before_rounding() {
        let ctx = ctx();
        let huge = "123456789012345678901234567890";
        let value = apply(&ctx, BinaryOp::Add, huge.into(), 0.5f64.into()).unwrap();
        let exact: Integer = huge.parse().unwrap();
        let expected = Float::with_val(53, &exact);
        assert_eq!(value.rank(), Rank::Float);
        assert_eq!(*value.as_float().unwrap(), expected);
    }

    #[test]
    fn integer_accumulator_refuses_division() {
        let ctx = ctx();
        let mut lhs = Value::Integer(ctx.integers().checkout_default());
        let rhs = Value::Integer(ctx.integers().checkout_default());
        let err = lhs.combine(BinaryOp::Div, &rhs).unwrap_err();
        assert!(matches!(
            err,
            NumericError::Incompatible {
                from: Rank::Integer,
                to: Rank::Rational
            }
        ));
    }

    #[test]
    fn precision_hint_zero_is_default() {
        assert_eq!(precision_hint(0), ComplexPrecision::default());
        assert_eq!(precision_hint(80).bits(), (80, 80));
    }
}
