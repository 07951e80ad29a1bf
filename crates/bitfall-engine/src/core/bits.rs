use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, Shr,
};

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-width bitmask stored as `N` little-endian 64-bit words.
///
/// Bit `i` lives in `words[i / 64]` at position `i % 64`. Shifting left moves bits toward
/// higher indices; bits pushed past `N * 64` are discarded, as are bits shifted below 0.
///
/// Every operation is a `const fn` so that lookup tables built from masks can be computed
/// at compile time. The operator traits delegate to the const methods.
///
/// # Example
///
/// ```
/// use bitfall_engine::Bits;
///
/// let a = Bits::<2>::from_u64(0b11).shl(63);
/// assert!(a.bit(63));
/// assert!(a.bit(64));
/// assert_eq!(a.shr(63), Bits::from_u64(0b11));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bits<const N: usize> {
    words: [u64; N],
}

impl<const N: usize> Default for Bits<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> Bits<N> {
    /// Total number of addressable bits.
    pub const BITS: usize = N * WORD_BITS;

    pub const ZERO: Self = Self { words: [0; N] };

    /// Places `value` in the lowest 64 bits.
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        let mut words = [0; N];
        words[0] = value;
        Self { words }
    }

    /// Returns a mask with bits `0..len` set.
    #[must_use]
    pub const fn low_mask(len: usize) -> Self {
        let mut words = [0; N];
        let mut i = 0;
        while i < N {
            let start = i * WORD_BITS;
            if len >= start + WORD_BITS {
                words[i] = u64::MAX;
            } else if len > start {
                words[i] = (1 << (len - start)) - 1;
            }
            i += 1;
        }
        Self { words }
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        let mut i = 0;
        while i < N {
            if self.words[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    #[must_use]
    pub const fn bit(&self, index: usize) -> bool {
        assert!(index < Self::BITS);
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 != 0
    }

    #[must_use]
    pub const fn with_bit(self, index: usize) -> Self {
        assert!(index < Self::BITS);
        let mut words = self.words;
        words[index / WORD_BITS] |= 1 << (index % WORD_BITS);
        Self { words }
    }

    #[must_use]
    pub const fn count_ones(&self) -> u32 {
        let mut count = 0;
        let mut i = 0;
        while i < N {
            count += self.words[i].count_ones();
            i += 1;
        }
        count
    }

    /// Shifts all bits toward higher indices by `n`.
    #[must_use]
    pub const fn shl(self, n: usize) -> Self {
        if n >= Self::BITS {
            return Self::ZERO;
        }
        let word_shift = n / WORD_BITS;
        let bit_shift = n % WORD_BITS;
        let mut words = [0; N];
        let mut i = word_shift;
        while i < N {
            words[i] = self.words[i - word_shift] << bit_shift;
            if bit_shift > 0 && i > word_shift {
                words[i] |= self.words[i - word_shift - 1] >> (WORD_BITS - bit_shift);
            }
            i += 1;
        }
        Self { words }
    }

    /// Shifts all bits toward lower indices by `n`.
    #[must_use]
    pub const fn shr(self, n: usize) -> Self {
        if n >= Self::BITS {
            return Self::ZERO;
        }
        let word_shift = n / WORD_BITS;
        let bit_shift = n % WORD_BITS;
        let mut words = [0; N];
        let mut i = 0;
        while i + word_shift < N {
            words[i] = self.words[i + word_shift] >> bit_shift;
            if bit_shift > 0 && i + word_shift + 1 < N {
                words[i] |= self.words[i + word_shift + 1] << (WORD_BITS - bit_shift);
            }
            i += 1;
        }
        Self { words }
    }

    #[must_use]
    pub const fn and(self, rhs: Self) -> Self {
        let mut words = self.words;
        let mut i = 0;
        while i < N {
            words[i] &= rhs.words[i];
            i += 1;
        }
        Self { words }
    }

    #[must_use]
    pub const fn or(self, rhs: Self) -> Self {
        let mut words = self.words;
        let mut i = 0;
        while i < N {
            words[i] |= rhs.words[i];
            i += 1;
        }
        Self { words }
    }

    #[must_use]
    pub const fn xor(self, rhs: Self) -> Self {
        let mut words = self.words;
        let mut i = 0;
        while i < N {
            words[i] ^= rhs.words[i];
            i += 1;
        }
        Self { words }
    }

    /// Reinterprets the low bits as a mask of a different width.
    ///
    /// Widening zero-fills; narrowing drops the high words.
    #[must_use]
    pub const fn resize<const M: usize>(self) -> Bits<M> {
        let mut words = [0; M];
        let mut i = 0;
        while i < N && i < M {
            words[i] = self.words[i];
            i += 1;
        }
        Bits { words }
    }
}

impl<const N: usize> Shl<usize> for Bits<N> {
    type Output = Self;

    fn shl(self, rhs: usize) -> Self {
        Bits::shl(self, rhs)
    }
}

impl<const N: usize> Shr<usize> for Bits<N> {
    type Output = Self;

    fn shr(self, rhs: usize) -> Self {
        Bits::shr(self, rhs)
    }
}

impl<const N: usize> BitAnd for Bits<N> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}

impl<const N: usize> BitOr for Bits<N> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}

impl<const N: usize> BitXor for Bits<N> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.xor(rhs)
    }
}

impl<const N: usize> BitAndAssign for Bits<N> {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.and(rhs);
    }
}

impl<const N: usize> BitOrAssign for Bits<N> {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.or(rhs);
    }
}

impl<const N: usize> BitXorAssign for Bits<N> {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = self.xor(rhs);
    }
}

impl<const N: usize> Not for Bits<N> {
    type Output = Self;

    fn not(self) -> Self {
        let mut words = self.words;
        for word in &mut words {
            *word = !*word;
        }
        Self { words }
    }
}
