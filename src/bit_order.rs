//! Bit ordering of data and ecc bytes
//!
//! NAND controllers disagree about which end of a byte enters the encoder
//! first. [`BitOrder::MsbFirst`] feeds bit 7 first; [`BitOrder::LsbFirst`]
//! (the `swap_bits` convention) reverses every byte before it reaches the
//! LFSR and reverses ecc bytes on the way in and out.

/// Byte bit-reversal lookup table
static REVERSED: [u8; 256] = build_reverse_table();

const fn build_reverse_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut byte = i as u8;
        let mut reversed = 0u8;
        let mut bit = 0;
        while bit < 8 {
            reversed = (reversed << 1) | (byte & 1);
            byte >>= 1;
            bit += 1;
        }
        table[i] = reversed;
        i += 1;
    }
    table
}

/// Reverse the bit order within a byte (b7..b0 -> b0..b7)
#[inline]
pub fn reverse_bits(byte: u8) -> u8 {
    REVERSED[byte as usize]
}

/// Order in which the bits of each byte enter the code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {
    /// Most significant bit first
    #[default]
    MsbFirst,
    /// Least significant bit first (bytes are bit-swapped)
    LsbFirst,
}

impl BitOrder {
    /// Pick the order from a `swap_bits` flag
    pub fn from_swap_bits(swap_bits: bool) -> Self {
        if swap_bits {
            BitOrder::LsbFirst
        } else {
            BitOrder::MsbFirst
        }
    }

    /// Whether bytes are bit-swapped
    #[inline]
    pub fn swaps_bits(self) -> bool {
        self == BitOrder::LsbFirst
    }

    /// Map a caller byte to encoder order (an involution)
    #[inline]
    pub fn apply(self, byte: u8) -> u8 {
        match self {
            BitOrder::MsbFirst => byte,
            BitOrder::LsbFirst => reverse_bits(byte),
        }
    }

    /// Apply [`BitOrder::apply`] to every byte of a buffer in place
    pub fn apply_slice(self, bytes: &mut [u8]) {
        if self.swaps_bits() {
            for byte in bytes.iter_mut() {
                *byte = reverse_bits(*byte);
            }
        }
    }

    /// Convert a sequential codeword bit index into a caller bit index
    ///
    /// Sequential index `s` counts bits in the order they entered the encoder.
    /// The returned index `b` addresses `buf[b / 8] & (1 << (b % 8))`.
    #[inline]
    pub(crate) fn caller_bit(self, sequential: usize) -> usize {
        match self {
            BitOrder::MsbFirst => (sequential & !7) | (7 - (sequential & 7)),
            BitOrder::LsbFirst => sequential,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_bits_known_values() {
        assert_eq!(reverse_bits(0x00), 0x00);
        assert_eq!(reverse_bits(0xFF), 0xFF);
        assert_eq!(reverse_bits(0x01), 0x80);
        assert_eq!(reverse_bits(0xA5), 0xA5);
        assert_eq!(reverse_bits(0x3C), 0x3C);
        assert_eq!(reverse_bits(0x12), 0x48);
    }

    #[test]
    fn test_reverse_is_involution() {
        for byte in 0..=255u8 {
            assert_eq!(reverse_bits(reverse_bits(byte)), byte);
        }
    }

    #[test]
    fn test_reverse_matches_bit_loop() {
        for byte in 0..=255u8 {
            let mut expected = 0u8;
            for bit in 0..8 {
                if byte & (1 << bit) != 0 {
                    expected |= 0x80 >> bit;
                }
            }
            assert_eq!(reverse_bits(byte), expected);
        }
    }

    #[test]
    fn test_apply_slice() {
        let mut buf = [0x01, 0x02, 0xF0];
        BitOrder::MsbFirst.apply_slice(&mut buf);
        assert_eq!(buf, [0x01, 0x02, 0xF0]);

        BitOrder::LsbFirst.apply_slice(&mut buf);
        assert_eq!(buf, [0x80, 0x40, 0x0F]);
    }

    #[test]
    fn test_caller_bit_mapping() {
        // first bit into an MSB-first encoder is bit 7 of byte 0
        assert_eq!(BitOrder::MsbFirst.caller_bit(0), 7);
        assert_eq!(BitOrder::MsbFirst.caller_bit(7), 0);
        assert_eq!(BitOrder::MsbFirst.caller_bit(34), 37);
        assert_eq!(BitOrder::LsbFirst.caller_bit(34), 34);
    }

    #[test]
    fn test_from_swap_bits() {
        assert_eq!(BitOrder::from_swap_bits(false), BitOrder::MsbFirst);
        assert_eq!(BitOrder::from_swap_bits(true), BitOrder::LsbFirst);
        assert_eq!(BitOrder::default(), BitOrder::MsbFirst);
    }
}
