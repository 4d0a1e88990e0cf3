//! Numeric contract and non-negative arithmetic
//!
//! Variance accumulators must never go negative, even when the sample type is
//! an unsigned integer that cannot hold an intermediate `a - b < 0`, or a float
//! whose rounding would leave a tiny negative residue. Every variance update in
//! this crate goes through [`add_product_of_differences`] or
//! [`sub_product_of_differences`], which keep the accumulator in `[0, ∞)`.

use core::ops::{Add, Mul, Sub};

use num_traits::{One, Zero};

/// Numeric types that estimators can operate on
///
/// Values are moved and cloned, never copied, so arbitrary-precision types can
/// implement this trait as well as the primitive integers and floats.
pub trait Numeric:
    Clone + PartialOrd + Zero + One + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
{
    /// Whether the domain can represent negative values
    const SIGNED: bool;

    /// Divide by a number of samples
    ///
    /// Integer domains truncate. Returns zero when `count` is zero.
    fn div_count(self, count: usize) -> Self;

    /// Move `self` toward `target` by `(target - self) / count`
    ///
    /// The step is computed on the magnitude of the difference, so neither the
    /// difference nor the result leaves the domain: the distance between
    /// `i64::MIN` and `i64::MAX` does not fit an `i64`, but its half does.
    /// Integer domains truncate the step toward zero. Returns `self` when
    /// `count` is zero.
    fn step_toward(self, target: Self, count: usize) -> Self {
        if count == 0 {
            return self;
        }
        let (delta, below) = abs_diff(target, self.clone());
        let step = delta.div_count(count);
        if below {
            self - step
        } else {
            self + step
        }
    }
}

macro_rules! impl_numeric_unsigned {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                const SIGNED: bool = false;

                #[inline]
                fn div_count(self, count: usize) -> Self {
                    if count == 0 {
                        return 0;
                    }
                    // the quotient never exceeds self, so narrowing back is lossless
                    (self as u128 / count as u128) as $t
                }
            }
        )*
    };
}

macro_rules! impl_numeric_signed {
    ($($t:ty => $u:ty),*) => {
        $(
            impl Numeric for $t {
                const SIGNED: bool = true;

                #[inline]
                fn div_count(self, count: usize) -> Self {
                    if count == 0 {
                        return 0;
                    }
                    // the quotient never exceeds |self|, so narrowing back is lossless
                    (self as i128 / count as i128) as $t
                }

                #[inline]
                fn step_toward(self, target: Self, count: usize) -> Self {
                    if count == 0 {
                        return self;
                    }
                    // |target - self| always fits the unsigned twin
                    let step = (self.abs_diff(target) as u128 / count as u128) as $u;
                    if target < self {
                        self.wrapping_sub_unsigned(step)
                    } else {
                        self.wrapping_add_unsigned(step)
                    }
                }
            }
        )*
    };
}

macro_rules! impl_numeric_float {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                const SIGNED: bool = true;

                #[inline]
                fn div_count(self, count: usize) -> Self {
                    if count == 0 {
                        0.0
                    } else {
                        self / count as $t
                    }
                }
            }
        )*
    };
}

impl_numeric_unsigned!(u8, u16, u32, u64, u128, usize);
impl_numeric_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);
impl_numeric_float!(f32, f64);

/// Ordered difference: returns `(|a - b|, a < b)`
///
/// The subtraction is always performed larger-minus-smaller, so it is valid in
/// unsigned domains.
#[inline]
pub fn abs_diff<V: Numeric>(a: V, b: V) -> (V, bool) {
    if a < b {
        (b - a, true)
    } else {
        (a - b, false)
    }
}

/// Computes `r += (a - b) * (c - d)` in a domain of non-negative numbers
///
/// The result saturates at zero instead of underflowing (unsigned domains) or
/// going negative through rounding (signed and floating point domains).
#[inline]
pub fn add_product_of_differences<V: Numeric>(r: &mut V, a: V, b: V, c: V, d: V) {
    let zero = V::zero();
    debug_assert!(!(*r < zero), "accumulator must be non-negative");

    let current = core::mem::replace(r, V::zero());

    if V::SIGNED {
        let next = current + (a - b) * (c - d);
        *r = if next < zero { zero } else { next };
        return;
    }

    let (ab, ab_negative) = abs_diff(a, b);
    let (cd, cd_negative) = abs_diff(c, d);
    let product = ab * cd;

    *r = if ab_negative == cd_negative {
        current + product
    } else if current < product {
        zero
    } else {
        current - product
    };
}

/// Computes `r -= (a - b) * (c - d)` in a domain of non-negative numbers
///
/// See [`add_product_of_differences`].
#[inline]
pub fn sub_product_of_differences<V: Numeric>(r: &mut V, a: V, b: V, c: V, d: V) {
    add_product_of_differences(r, b, a, c, d)
}
