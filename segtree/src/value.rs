use std::fmt::{Debug, Display};

/// Element type stored in the tree.
///
/// Sums are computed modulo `2^BITS`, so every sum that fits in the type is
/// exact even when partial sums or range-update deltas do not.
pub trait Value: Copy + Ord + Debug + Display {
    /// Neutral element of addition.
    const ZERO: Self;
    const MIN: Self;
    const MAX: Self;

    /// Two's-complement addition.
    fn add_wrapping(self, rhs: Self) -> Self;

    /// The effect of adding `self` to each of `n` elements on their sum,
    /// wrapped like [`Value::add_wrapping`].
    fn scale(self, n: usize) -> Self;
}

macro_rules! impl_value {
    ($($t:ty)*) => {$(
        impl Value for $t {
            const ZERO: Self = 0;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn add_wrapping(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline]
            fn scale(self, n: usize) -> Self {
                if let Ok(n) = <$t>::try_from(n) {
                    return <$t>::wrapping_mul(self, n);
                }
                // `n` does not fit: double and add over its bits.
                let (mut acc, mut base, mut n) = (0 as $t, self, n);
                while n > 0 {
                    if n & 1 == 1 {
                        acc = <$t>::wrapping_add(acc, base);
                    }
                    base = <$t>::wrapping_add(base, base);
                    n >>= 1;
                }
                acc
            }
        }
    )*};
}

impl_value!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scale() {
        assert_eq!(3i64.scale(4), 12);
        assert_eq!((-2i32).scale(5), -10);
        assert_eq!(7u8.scale(1), 7);
        assert_eq!(0usize.scale(1000), 0);
    }

    #[test]
    fn scale_past_type_bounds() {
        // Lengths wider than the type: 200 = -56 (mod 256), -300 = -44 (mod 256).
        assert_eq!(1i8.scale(200), -56);
        assert_eq!((-1i8).scale(300), -44);
        assert_eq!(3u8.scale(1000), (3000 % 256) as u8);
        assert_eq!(5i16.scale(usize::MAX), -5);

        // The product overflows but the resulting sum fits.
        let delta = 4000i32.scale(1_000_000);
        assert_eq!((-2_000_000_000i32).add_wrapping(delta), 2_000_000_000);
    }

    #[test]
    fn bounds() {
        assert_eq!(<i32 as Value>::MAX, i32::MAX);
        assert_eq!(<u64 as Value>::MIN, 0);
        assert_eq!(<i64 as Value>::ZERO, 0);
        assert_eq!(i8::MAX.add_wrapping(1), i8::MIN);
    }
}
