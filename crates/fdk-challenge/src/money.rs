//! Fixed-point money type.
//!
//! # Motivation
//!
//! All money amounts in this system use a 1e-6 (micros) fixed-point
//! representation stored as `i64`.  Using raw `i64` for money is error-prone:
//! it allows accidental arithmetic with unrelated integers (trade counts,
//! day numbers, percentages) without any compile-time signal.
//!
//! `Micros` wraps the raw `i64` so the type system prevents:
//! - Implicit construction from raw `i64` (no `From<i64>` impl).
//! - Mixing `Micros` with unrelated `i64` values in arithmetic.
//!
//! # Scale
//!
//! 1 USD = 1_000_000 Micros.  All monetary values (balances, P/L, risk
//! amounts, thresholds) use this scale.  Non-monetary quantities (trade
//! counts, day numbers, percentages) remain plain integers and are never
//! implicitly convertible.
//!
//! # Arithmetic
//!
//! Scaling by a percentage (`mul_pct`) widens to i128 internally so the
//! intermediate product cannot overflow; division by a count (`div_count`)
//! truncates toward zero.  No floating point anywhere.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// 1e-6 fixed-point scale.
pub const MICROS_SCALE: i64 = 1_000_000;

// ---------------------------------------------------------------------------
// Micros newtype
// ---------------------------------------------------------------------------

/// A fixed-point monetary amount at 1e-6 scale (micros).
///
/// 1 USD = `Micros(1_000_000)`.
///
/// Use [`Micros::new`] (raw micros) or [`Micros::from_dollars`] (whole
/// dollars) for construction; there is intentionally no `From<i64>` impl.
/// Use [`Micros::raw`] to extract the underlying `i64` when crossing crate
/// or storage boundaries that require raw integers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Micros(i64);

impl Micros {
    /// Zero monetary amount.
    pub const ZERO: Micros = Micros(0);

    /// Construct from a raw micros `i64`.
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Micros(raw)
    }

    /// Construct from a whole-dollar amount.
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Micros(dollars * MICROS_SCALE)
    }

    /// Extract the underlying raw `i64`.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Saturating addition — clamps at the `i64` bounds on overflow.
    #[inline]
    pub fn saturating_add(self, rhs: Micros) -> Micros {
        Micros(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction — clamps at the `i64` bounds on underflow.
    #[inline]
    pub fn saturating_sub(self, rhs: Micros) -> Micros {
        Micros(self.0.saturating_sub(rhs.0))
    }

    /// Scale by an integer percentage (e.g. `120` = ×1.20, `75` = ×0.75).
    ///
    /// The product is computed in i128 so the intermediate cannot overflow;
    /// the result saturates at the `i64` bounds.  Truncates toward zero.
    #[inline]
    pub fn mul_pct(self, pct: i64) -> Micros {
        let wide = (self.0 as i128) * (pct as i128) / 100;
        Micros(clamp_i128(wide))
    }

    /// Divide by a positive count (e.g. a per-day trade count).
    ///
    /// Truncates toward zero.  A zero or negative count has no meaningful
    /// interpretation here; callers validate counts before reaching this.
    #[inline]
    pub fn div_count(self, count: i64) -> Micros {
        debug_assert!(count > 0);
        Micros(self.0 / count.max(1))
    }

    /// Multiply by an integer count with overflow detection.
    ///
    /// Returns `None` on overflow; callers must handle this explicitly —
    /// overflow in a P/L calculation is a hard error, not a saturation.
    #[inline]
    pub fn checked_mul_count(self, count: i64) -> Option<Micros> {
        self.0.checked_mul(count).map(Micros)
    }

    /// Smaller of two amounts.
    #[inline]
    pub fn min(self, other: Micros) -> Micros {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Larger of two amounts.
    #[inline]
    pub fn max(self, other: Micros) -> Micros {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }

    /// `true` if this amount is strictly positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// `true` if this amount is strictly negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Parse a signed decimal string (e.g. `"240"`, `"-80.50"`) to micros.
    ///
    /// Returns `None` for anything that is not a plain decimal number with
    /// at most six fractional digits.  Keeping the boundary on decimal
    /// strings means no floating-point rounding is ever introduced.
    pub fn parse_str(s: &str) -> Option<Micros> {
        let t = s.trim();
        if t.is_empty() {
            return None;
        }
        let (neg, rest) = match t.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, t.strip_prefix('+').unwrap_or(t)),
        };
        if rest.is_empty() {
            return None;
        }

        let (int_part, frac_part) = match rest.split_once('.') {
            Some((i, f)) => (i, f),
            None => (rest, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if frac_part.len() > 6 {
            return None;
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let whole: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().ok()?
        };
        // Right-pad the fractional digits to six places.
        let mut frac: i64 = 0;
        for (i, c) in frac_part.chars().enumerate() {
            let d = c.to_digit(10)? as i64;
            frac += d * 10_i64.pow(5 - i as u32);
        }

        let raw = whole.checked_mul(MICROS_SCALE)?.checked_add(frac)?;
        Some(Micros(if neg { -raw } else { raw }))
    }
}

// ---------------------------------------------------------------------------
// Arithmetic operators (closed over Micros)
// ---------------------------------------------------------------------------

impl Add for Micros {
    type Output = Micros;
    #[inline]
    fn add(self, rhs: Micros) -> Micros {
        Micros(self.0 + rhs.0)
    }
}

impl Sub for Micros {
    type Output = Micros;
    #[inline]
    fn sub(self, rhs: Micros) -> Micros {
        Micros(self.0 - rhs.0)
    }
}

impl Neg for Micros {
    type Output = Micros;
    #[inline]
    fn neg(self) -> Micros {
        Micros(-self.0)
    }
}

impl AddAssign for Micros {
    #[inline]
    fn add_assign(&mut self, rhs: Micros) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Micros {
    #[inline]
    fn sub_assign(&mut self, rhs: Micros) {
        self.0 -= rhs.0;
    }
}

fn clamp_i128(v: i128) -> i64 {
    if v > i64::MAX as i128 {
        i64::MAX
    } else if v < i64::MIN as i128 {
        i64::MIN
    } else {
        v as i64
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl std::fmt::Display for Micros {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dollars = self.0 / MICROS_SCALE;
        let frac = (self.0 % MICROS_SCALE).abs();
        // When |value| < $1 and value is negative, dollars truncates to 0,
        // losing the sign.  Emit "-0" explicitly in that case.
        if self.0 < 0 && dollars == 0 {
            write!(f, "-{dollars}.{frac:06}")
        } else {
            write!(f, "{dollars}.{frac:06}")
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_dollars_scales() {
        assert_eq!(Micros::from_dollars(6_000).raw(), 6_000_000_000);
        assert_eq!(Micros::from_dollars(0), Micros::ZERO);
    }

    #[test]
    fn add_and_sub_roundtrip() {
        let a = Micros::from_dollars(100);
        let b = Micros::from_dollars(25);
        assert_eq!((a + b) - b, a);
    }

    #[test]
    fn mul_pct_up_and_down() {
        let risk = Micros::from_dollars(80);
        assert_eq!(risk.mul_pct(120), Micros::from_dollars(96));
        assert_eq!(risk.mul_pct(75), Micros::from_dollars(60));
        assert_eq!(risk.mul_pct(100), risk);
    }

    #[test]
    fn mul_pct_truncates_toward_zero() {
        // 1 micro × 75% truncates to 0.
        assert_eq!(Micros::new(1).mul_pct(75), Micros::ZERO);
        assert_eq!(Micros::new(-1).mul_pct(75), Micros::ZERO);
    }

    #[test]
    fn mul_pct_saturates_instead_of_overflowing() {
        assert_eq!(Micros::new(i64::MAX).mul_pct(120).raw(), i64::MAX);
    }

    #[test]
    fn div_count_halves() {
        assert_eq!(
            Micros::from_dollars(300).div_count(2),
            Micros::from_dollars(150)
        );
    }

    #[test]
    fn checked_mul_count_overflow_returns_none() {
        assert_eq!(Micros::new(i64::MAX).checked_mul_count(2), None);
        assert_eq!(
            Micros::from_dollars(240).checked_mul_count(2),
            Some(Micros::from_dollars(480))
        );
    }

    #[test]
    fn min_max_ordering() {
        let a = Micros::from_dollars(40);
        let b = Micros::from_dollars(90);
        assert_eq!(a.min(b), a);
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn parse_plain_integers() {
        assert_eq!(Micros::parse_str("240"), Some(Micros::from_dollars(240)));
        assert_eq!(Micros::parse_str("-80"), Some(Micros::from_dollars(-80)));
        assert_eq!(Micros::parse_str("+15"), Some(Micros::from_dollars(15)));
        assert_eq!(Micros::parse_str("0"), Some(Micros::ZERO));
    }

    #[test]
    fn parse_decimals() {
        assert_eq!(Micros::parse_str("1.5"), Some(Micros::new(1_500_000)));
        assert_eq!(Micros::parse_str("-2.75"), Some(Micros::new(-2_750_000)));
        assert_eq!(Micros::parse_str(".25"), Some(Micros::new(250_000)));
        assert_eq!(Micros::parse_str("0.000001"), Some(Micros::new(1)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Micros::parse_str(""), None);
        assert_eq!(Micros::parse_str("abc"), None);
        assert_eq!(Micros::parse_str("1.2.3"), None);
        assert_eq!(Micros::parse_str("1.1234567"), None); // > 6 frac digits
        assert_eq!(Micros::parse_str("-"), None);
        assert_eq!(Micros::parse_str("."), None);
        assert_eq!(Micros::parse_str("1e3"), None);
    }

    #[test]
    fn display_formats_with_six_decimal_places() {
        assert_eq!(format!("{}", Micros::new(1_500_000)), "1.500000");
        assert_eq!(format!("{}", Micros::new(-2_750_000)), "-2.750000");
        // Sub-dollar negative keeps its sign.
        assert_eq!(format!("{}", Micros::new(-250_000)), "-0.250000");
    }
}
