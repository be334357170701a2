//! Syndrome computation
//!
//! Syndromes are stored zero-based: index k holds S_(k+1) = r(α^(k+1)).
//! Only the odd syndromes need real work. In characteristic 2,
//! r(α^2i) = r(α^i)^2, so every even syndrome is the square of one already
//! known.

use crate::galois::GaloisField;

/// Syndromes of a remainder R(x) = received word mod g(x)
///
/// Every root of g annihilates the codeword part of the received word, so
/// evaluating the ecc-sized remainder gives the same values as evaluating
/// the whole word, at a fraction of the cost.
pub(crate) fn remainder_syndromes(
    field: &GaloisField,
    remainder: &[u8],
    ecc_bits: usize,
    t: usize,
) -> Vec<u32> {
    let mut syndromes = vec![0u32; 2 * t];

    for k in 0..ecc_bits {
        if remainder[k / 8] & (0x80 >> (k % 8)) == 0 {
            continue;
        }
        let degree = ecc_bits - 1 - k;
        for j in (0..2 * t).step_by(2) {
            syndromes[j] ^= field.exp((j + 1) * degree);
        }
    }

    fill_even_syndromes(field, &mut syndromes);
    syndromes
}

/// Overwrite the even syndromes (odd indices) with squares of earlier ones
///
/// S_(2j+2) = S_(j+1)^2. Processing j in increasing order is safe in place:
/// index j is either an odd syndrome or an even one already filled.
pub fn fill_even_syndromes(field: &GaloisField, syndromes: &mut [u32]) {
    let t = syndromes.len() / 2;
    for j in 0..t {
        syndromes[2 * j + 1] = field.square(syndromes[j]);
    }
}

/// Evaluate a received word at α^1 .. α^2t by Horner's rule
///
/// `bits` yields the word highest power first.
pub(crate) fn horner_syndromes(
    field: &GaloisField,
    t: usize,
    bits: impl IntoIterator<Item = bool>,
) -> Vec<u32> {
    let points: Vec<u32> = (1..=2 * t).map(|i| field.exp(i)).collect();
    let mut syndromes = vec![0u32; 2 * t];

    for bit in bits {
        for (s, &x) in syndromes.iter_mut().zip(&points) {
            *s = field.mul(*s, x) ^ u32::from(bit);
        }
    }

    syndromes
}
