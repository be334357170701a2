//! Systematic BCH encoding by polynomial division
//!
//! The ecc of a message D(x) is the remainder of D(x)·x^e mod g(x), where
//! e = deg g. The remainder is kept left-justified in `ecc_bytes` bytes
//! (coefficient of x^(e-1) in bit 7 of byte 0) so it can be handed to the
//! caller as-is. Division runs a byte at a time through a 256-row table of
//! `(v(x)·x^e) mod g(x)` for every byte value v.

use super::generator::GeneratorPolynomial;
use crate::bit_order::BitOrder;

/// Byte-at-a-time LFSR for one generator polynomial
#[derive(Debug, Clone)]
pub struct Encoder {
    ecc_bits: usize,
    ecc_bytes: usize,
    /// 256 rows of `ecc_bytes` bytes
    table: Vec<u8>,
}

impl Encoder {
    pub fn new(generator: &GeneratorPolynomial) -> Self {
        let ecc_bits = generator.degree();
        let ecc_bytes = ecc_bits.div_ceil(8);
        let taps = generator.taps();
        let mut table = vec![0u8; 256 * ecc_bytes];

        for (value, row) in table.chunks_exact_mut(ecc_bytes).enumerate() {
            for bit in (0..8).rev() {
                let feedback = ((value >> bit) as u8 & 1) ^ (row[0] >> 7);
                shift_left_one(row);
                if feedback != 0 {
                    xor_into(row, &taps);
                }
            }
        }

        Encoder {
            ecc_bits,
            ecc_bytes,
            table,
        }
    }

    #[inline]
    pub fn ecc_bits(&self) -> usize {
        self.ecc_bits
    }

    #[inline]
    pub fn ecc_bytes(&self) -> usize {
        self.ecc_bytes
    }

    /// Mask of the meaningful bits in the last ecc byte
    #[inline]
    fn last_byte_mask(&self) -> u8 {
        match self.ecc_bits % 8 {
            0 => 0xFF,
            used => 0xFFu8 << (8 - used),
        }
    }

    /// Load caller ecc bytes into a remainder, clearing the unused pad bits
    pub(crate) fn load(&self, ecc: &[u8], order: BitOrder) -> Vec<u8> {
        debug_assert_eq!(ecc.len(), self.ecc_bytes);
        let mut remainder: Vec<u8> = ecc.iter().map(|&b| order.apply(b)).collect();
        if let Some(last) = remainder.last_mut() {
            *last &= self.last_byte_mask();
        }
        remainder
    }

    /// Write a remainder back out in the caller's bit order
    pub(crate) fn store(&self, remainder: &[u8], ecc: &mut [u8], order: BitOrder) {
        for (dst, &src) in ecc.iter_mut().zip(remainder) {
            *dst = order.apply(src);
        }
    }

    /// Divide `data` into the running remainder
    pub(crate) fn feed(&self, remainder: &mut [u8], data: &[u8], order: BitOrder) {
        let last = self.ecc_bytes - 1;

        for &byte in data {
            let index = (remainder[0] ^ order.apply(byte)) as usize;
            remainder.copy_within(1.., 0);
            remainder[last] = 0;

            let row = &self.table[index * self.ecc_bytes..(index + 1) * self.ecc_bytes];
            xor_into(remainder, row);
        }
    }
}

/// Shift a left-justified bit string one place towards the MSB
fn shift_left_one(bits: &mut [u8]) {
    let len = bits.len();
    for i in 0..len {
        let carry = if i + 1 < len { bits[i + 1] >> 7 } else { 0 };
        bits[i] = (bits[i] << 1) | carry;
    }
}

#[inline]
fn xor_into(dst: &mut [u8], src: &[u8]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}
