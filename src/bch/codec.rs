//! The configured BCH codec
//!
//! [`Bch`] owns the immutable tables built at configuration time and exposes
//! encode, decode and correct. Nothing is cached between calls: every decode
//! returns its syndromes and error locations in a [`Decoded`], so one codec
//! can be shared freely across threads.

use std::fmt;

use log::{debug, trace};

use super::chien::find_error_positions;
use super::config::BchConfig;
use super::correct::apply_corrections;
use super::encoder::Encoder;
use super::generator::GeneratorPolynomial;
use super::locator::ErrorLocator;
use super::syndrome::{fill_even_syndromes, horner_syndromes, remainder_syndromes};
use crate::bit_order::BitOrder;
use crate::error::{BchError, Result, Uncorrectable};
use crate::galois::GaloisField;

/// The shapes in which a received word can be handed to the decoder
///
/// All byte buffers are in the caller's bit order.
#[derive(Debug, Clone, Copy)]
pub enum Received<'a> {
    /// Received data and its received ecc
    Codeword { data: &'a [u8], ecc: &'a [u8] },
    /// Received ecc and the ecc freshly computed over the received data
    Ecc {
        data_len: usize,
        recv_ecc: &'a [u8],
        calc_ecc: &'a [u8],
    },
    /// `recv_ecc ^ calc_ecc`, already combined
    EccDelta { data_len: usize, delta: &'a [u8] },
    /// A full set of 2t syndromes computed elsewhere
    Syndromes { data_len: usize, syndromes: &'a [u32] },
}

impl Received<'_> {
    /// Length in bytes of the data part of the word
    pub fn data_len(&self) -> usize {
        match *self {
            Received::Codeword { data, .. } => data.len(),
            Received::Ecc { data_len, .. }
            | Received::EccDelta { data_len, .. }
            | Received::Syndromes { data_len, .. } => data_len,
        }
    }
}

/// Result of decoding one received word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    syndromes: Vec<u32>,
    outcome: std::result::Result<Vec<usize>, Uncorrectable>,
}

impl Decoded {
    /// The 2t syndromes; index k holds S_(k+1)
    pub fn syndromes(&self) -> &[u32] {
        &self.syndromes
    }

    /// Number of bit errors found, or -1 if the word is uncorrectable
    pub fn error_count(&self) -> i32 {
        match &self.outcome {
            Ok(locations) => locations.len() as i32,
            Err(_) => -1,
        }
    }

    /// Bit locations to flip in `data ‖ ecc`, ascending
    pub fn error_locations(&self) -> Option<&[usize]> {
        self.outcome.as_ref().ok().map(Vec::as_slice)
    }

    /// Whether the word decoded to a usable location list
    pub fn is_correctable(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Why the word could not be corrected, if it could not
    pub fn uncorrectable(&self) -> Option<&Uncorrectable> {
        self.outcome.as_ref().err()
    }

    /// The locations, or the uncorrectable reason as a [`BchError`]
    pub fn into_locations(self) -> Result<Vec<usize>> {
        self.outcome.map_err(BchError::from)
    }
}

/// A ready binary BCH codec
#[derive(Debug, Clone)]
pub struct Bch {
    t: usize,
    field: GaloisField,
    generator: GeneratorPolynomial,
    encoder: Encoder,
    bit_order: BitOrder,
}

impl Bch {
    /// Configure a codec in one call
    ///
    /// `polynomial` of `None` or `Some(0)` selects the default primitive
    /// polynomial for `order`; `order` of `None` derives m from the
    /// polynomial's degree.
    pub fn new(
        t: usize,
        polynomial: Option<u32>,
        order: Option<u32>,
        swap_bits: bool,
    ) -> Result<Self> {
        BchConfig {
            t,
            polynomial,
            order,
            bit_order: BitOrder::from_swap_bits(swap_bits),
        }
        .build()
    }

    pub(crate) fn from_parts(
        t: usize,
        field: GaloisField,
        generator: GeneratorPolynomial,
        encoder: Encoder,
        bit_order: BitOrder,
    ) -> Self {
        Bch {
            t,
            field,
            generator,
            encoder,
            bit_order,
        }
    }

    /// Number of correctable bit errors
    #[inline]
    pub fn t(&self) -> usize {
        self.t
    }

    /// Field order m
    #[inline]
    pub fn m(&self) -> u32 {
        self.field.order()
    }

    /// Maximum codeword length in bits, 2^m - 1
    #[inline]
    pub fn n(&self) -> usize {
        self.field.size() as usize
    }

    #[inline]
    pub fn ecc_bits(&self) -> usize {
        self.encoder.ecc_bits()
    }

    #[inline]
    pub fn ecc_bytes(&self) -> usize {
        self.encoder.ecc_bytes()
    }

    #[inline]
    pub fn polynomial(&self) -> u32 {
        self.field.polynomial()
    }

    #[inline]
    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    /// Largest data length in bytes a single codeword can protect
    pub fn max_data_len(&self) -> usize {
        (self.n() - self.ecc_bits()) / 8
    }

    pub fn field(&self) -> &GaloisField {
        &self.field
    }

    pub fn generator(&self) -> &GeneratorPolynomial {
        &self.generator
    }

    fn check_ecc_len(&self, len: usize, what: &str) -> Result<()> {
        if len != self.ecc_bytes() {
            return Err(BchError::InvalidArgument(format!(
                "{} is {} bytes, expected {}",
                what,
                len,
                self.ecc_bytes()
            )));
        }
        Ok(())
    }

    fn check_data_len(&self, data_len: usize) -> Result<()> {
        if data_len > self.max_data_len() {
            return Err(BchError::InvalidArgument(format!(
                "data is {} bytes, at most {} fit in one codeword",
                data_len,
                self.max_data_len()
            )));
        }
        Ok(())
    }

    fn check_syndromes(&self, syndromes: &[u32]) -> Result<()> {
        if syndromes.len() != 2 * self.t {
            return Err(BchError::InvalidArgument(format!(
                "expected {} syndromes, got {}",
                2 * self.t,
                syndromes.len()
            )));
        }
        let n = self.field.size();
        if let Some(&bad) = syndromes.iter().find(|&&s| s > n) {
            return Err(BchError::InvalidArgument(format!(
                "syndrome {} is not an element of GF(2^{})",
                bad,
                self.m()
            )));
        }
        Ok(())
    }

    /// Compute the ecc of `data`
    ///
    /// With `ecc` given, encoding continues from that ecc, so
    /// `encode(b, Some(&encode(a, None)?))` equals `encode(a ‖ b, None)`.
    pub fn encode(&self, data: &[u8], ecc: Option<&[u8]>) -> Result<Vec<u8>> {
        let mut out = match ecc {
            Some(ecc) => {
                self.check_ecc_len(ecc.len(), "starting ecc")?;
                ecc.to_vec()
            }
            None => vec![0u8; self.ecc_bytes()],
        };
        self.encode_into(data, &mut out)?;
        Ok(out)
    }

    /// Fold `data` into an ecc buffer in place
    pub fn encode_into(&self, data: &[u8], ecc: &mut [u8]) -> Result<()> {
        self.check_ecc_len(ecc.len(), "ecc")?;
        let mut remainder = self.encoder.load(ecc, self.bit_order);
        self.encoder.feed(&mut remainder, data, self.bit_order);
        self.encoder.store(&remainder, ecc, self.bit_order);
        Ok(())
    }

    /// The 2t syndromes of a received word
    ///
    /// Byte-shaped input is reduced to R(x) = recv_ecc ^ calc_ecc first; the
    /// syndromes of R equal those of the whole word.
    pub fn syndromes(&self, received: Received<'_>) -> Result<Vec<u32>> {
        self.check_data_len(received.data_len())?;

        let remainder = match received {
            Received::Syndromes { syndromes, .. } => {
                self.check_syndromes(syndromes)?;
                return Ok(syndromes.to_vec());
            }
            Received::Codeword { data, ecc } => {
                self.check_ecc_len(ecc.len(), "received ecc")?;
                let mut calc = vec![0u8; self.ecc_bytes()];
                self.encoder.feed(&mut calc, data, self.bit_order);
                let recv = self.encoder.load(ecc, self.bit_order);
                xor(calc, &recv)
            }
            Received::Ecc {
                recv_ecc, calc_ecc, ..
            } => {
                self.check_ecc_len(recv_ecc.len(), "received ecc")?;
                self.check_ecc_len(calc_ecc.len(), "calculated ecc")?;
                let recv = self.encoder.load(recv_ecc, self.bit_order);
                let calc = self.encoder.load(calc_ecc, self.bit_order);
                xor(recv, &calc)
            }
            Received::EccDelta { delta, .. } => {
                self.check_ecc_len(delta.len(), "ecc delta")?;
                self.encoder.load(delta, self.bit_order)
            }
        };

        Ok(remainder_syndromes(
            &self.field,
            &remainder,
            self.ecc_bits(),
            self.t,
        ))
    }

    /// Decode a received data/ecc pair
    pub fn decode(&self, data: &[u8], ecc: &[u8]) -> Result<Decoded> {
        self.decode_with(Received::Codeword { data, ecc })
    }

    /// Decode a received word in any of its shapes
    ///
    /// `Err` means the arguments were invalid. An uncorrectable word is a
    /// successful decode whose [`Decoded`] reports the failure.
    pub fn decode_with(&self, received: Received<'_>) -> Result<Decoded> {
        let data_len = received.data_len();
        let syndromes = self.syndromes(received)?;
        let outcome = self.locate(data_len, &syndromes);

        match &outcome {
            Ok(locations) => trace!("decoded {} bytes: {} errors", data_len, locations.len()),
            Err(reason) => debug!("uncorrectable {}-byte word: {}", data_len, reason),
        }

        Ok(Decoded { syndromes, outcome })
    }

    /// Turn syndromes into caller bit locations
    fn locate(
        &self,
        data_len: usize,
        syndromes: &[u32],
    ) -> std::result::Result<Vec<usize>, Uncorrectable> {
        if syndromes.iter().all(|&s| s == 0) {
            return Ok(Vec::new());
        }

        let locator = ErrorLocator::solve(&self.field, syndromes, self.t)?;
        let positions = find_error_positions(&self.field, &locator)?;

        let nbits = data_len * 8 + self.ecc_bits();
        let mut locations = Vec::with_capacity(positions.len());
        for position in positions {
            if position >= nbits {
                return Err(Uncorrectable::OutOfRange {
                    location: position,
                    limit: nbits,
                });
            }
            // highest degree is the first bit fed to the encoder
            let sequential = nbits - 1 - position;
            locations.push(self.bit_order.caller_bit(sequential));
        }

        locations.sort_unstable();
        Ok(locations)
    }

    /// Flip the located bits of `data ‖ ecc`, returning how many were flipped
    ///
    /// Locations past the data are applied to `ecc` when it is given and
    /// skipped otherwise.
    pub fn correct(
        &self,
        data: &mut [u8],
        ecc: Option<&mut [u8]>,
        locations: &[usize],
    ) -> Result<usize> {
        apply_corrections(data, ecc, self.ecc_bytes(), locations)
    }

    /// Decode and, if correctable, repair both buffers in place
    ///
    /// An uncorrectable word leaves both buffers untouched.
    pub fn decode_in_place(&self, data: &mut [u8], ecc: &mut [u8]) -> Result<Decoded> {
        let decoded = self.decode(data, ecc)?;
        if let Some(locations) = decoded.error_locations() {
            self.correct(data, Some(ecc), locations)?;
        }
        Ok(decoded)
    }

    /// Fill in the even syndromes of a set whose odd ones are known
    ///
    /// Only indices 0, 2, 4, ... (S_1, S_3, S_5, ...) are read.
    pub fn compute_even_syndromes(&self, syndromes: &[u32]) -> Result<Vec<u32>> {
        if syndromes.len() != 2 * self.t {
            return Err(BchError::InvalidArgument(format!(
                "expected {} syndromes, got {}",
                2 * self.t,
                syndromes.len()
            )));
        }
        let n = self.field.size();
        if let Some(&bad) = syndromes.iter().step_by(2).find(|&&s| s > n) {
            return Err(BchError::InvalidArgument(format!(
                "syndrome {} is not an element of GF(2^{})",
                bad,
                self.m()
            )));
        }

        let mut full = syndromes.to_vec();
        fill_even_syndromes(&self.field, &mut full);
        Ok(full)
    }

    /// Syndromes by direct evaluation of the whole received word
    ///
    /// Slower than [`Bch::syndromes`] by a factor of the word length over
    /// `ecc_bits`; gives the same values.
    pub fn evaluate_syndromes(&self, data: &[u8], ecc: &[u8]) -> Result<Vec<u32>> {
        self.check_ecc_len(ecc.len(), "received ecc")?;
        self.check_data_len(data.len())?;

        let ecc = self.encoder.load(ecc, self.bit_order);
        let order = self.bit_order;
        let data_bits = data
            .iter()
            .flat_map(move |&byte| byte_bits(order.apply(byte)));
        let ecc_bits = ecc
            .iter()
            .flat_map(|&byte| byte_bits(byte))
            .take(self.ecc_bits());

        Ok(horner_syndromes(
            &self.field,
            self.t,
            data_bits.chain(ecc_bits),
        ))
    }
}

impl fmt::Display for Bch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BCH({}, {}, {}) over GF(2^{})",
            self.n(),
            self.n() - self.ecc_bits(),
            self.t,
            self.m()
        )
    }
}

/// Bits of a byte, MSB first
fn byte_bits(byte: u8) -> impl Iterator<Item = bool> {
    (0..8).rev().map(move |bit| byte & (1 << bit) != 0)
}

fn xor(mut a: Vec<u8>, b: &[u8]) -> Vec<u8> {
    for (x, &y) in a.iter_mut().zip(b) {
        *x ^= y;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn codec() -> Bch {
        Bch::new(4, None, Some(13), false).unwrap()
    }

    #[test]
    fn test_accessors_and_display() {
        let bch = codec();
        assert_eq!(bch.t(), 4);
        assert_eq!(bch.m(), 13);
        assert_eq!(bch.n(), 8191);
        assert_eq!(bch.ecc_bits(), 52);
        assert_eq!(bch.ecc_bytes(), 7);
        assert_eq!(bch.polynomial(), 0x201b);
        assert_eq!(bch.max_data_len(), (8191 - 52) / 8);
        assert_eq!(bch.to_string(), "BCH(8191, 8139, 4) over GF(2^13)");
    }

    #[test]
    fn test_clean_word_has_zero_syndromes() {
        init_logger();
        let bch = codec();
        let data: Vec<u8> = (0..100).collect();
        let ecc = bch.encode(&data, None).unwrap();

        let decoded = bch.decode(&data, &ecc).unwrap();
        assert_eq!(decoded.error_count(), 0);
        assert_eq!(decoded.syndromes(), &[0; 8]);
        assert_eq!(decoded.error_locations(), Some(&[][..]));
    }

    #[test]
    fn test_remainder_syndromes_match_word_evaluation() {
        let bch = codec();
        let mut data: Vec<u8> = (0..64).map(|i| (i * 7) as u8).collect();
        let mut ecc = bch.encode(&data, None).unwrap();
        data[3] ^= 0x40;
        data[60] ^= 0x01;
        ecc[2] ^= 0x10;

        let fast = bch.syndromes(Received::Codeword { data: &data, ecc: &ecc }).unwrap();
        let slow = bch.evaluate_syndromes(&data, &ecc).unwrap();
        assert_eq!(fast, slow);
        assert!(fast.iter().any(|&s| s != 0));
    }

    #[test]
    fn test_decode_shapes_agree() {
        let bch = codec();
        let data = vec![0x5Au8; 200];
        let ecc = bch.encode(&data, None).unwrap();

        let mut corrupted = data.clone();
        corrupted[10] ^= 0x81;
        let calc = bch.encode(&corrupted, None).unwrap();
        let delta: Vec<u8> = ecc.iter().zip(&calc).map(|(a, b)| a ^ b).collect();

        let from_codeword = bch.decode(&corrupted, &ecc).unwrap();
        let from_ecc = bch
            .decode_with(Received::Ecc {
                data_len: 200,
                recv_ecc: &ecc,
                calc_ecc: &calc,
            })
            .unwrap();
        let from_delta = bch
            .decode_with(Received::EccDelta {
                data_len: 200,
                delta: &delta,
            })
            .unwrap();
        let from_syndromes = bch
            .decode_with(Received::Syndromes {
                data_len: 200,
                syndromes: from_codeword.syndromes(),
            })
            .unwrap();

        assert_eq!(from_codeword.error_locations(), Some(&[80, 87][..]));
        assert_eq!(from_ecc, from_codeword);
        assert_eq!(from_delta, from_codeword);
        assert_eq!(from_syndromes, from_codeword);
    }

    #[test]
    fn test_rejects_oversized_data() {
        let bch = codec();
        let data = vec![0u8; bch.max_data_len() + 1];
        let ecc = vec![0u8; bch.ecc_bytes()];
        assert!(matches!(
            bch.decode(&data, &ecc),
            Err(BchError::InvalidArgument(_))
        ));

        let data = vec![0u8; bch.max_data_len()];
        assert!(bch.decode(&data, &ecc).is_ok());
    }

    #[test]
    fn test_huge_claimed_data_len_is_invalid_argument() {
        let bch = codec();
        let syndromes = [0u32; 8];
        let delta = [0u8; 7];

        for received in [
            Received::Syndromes {
                data_len: usize::MAX / 4,
                syndromes: &syndromes,
            },
            Received::EccDelta {
                data_len: usize::MAX,
                delta: &delta,
            },
            Received::Ecc {
                data_len: usize::MAX / 8 + 1,
                recv_ecc: &delta,
                calc_ecc: &delta,
            },
        ] {
            assert!(matches!(
                bch.decode_with(received),
                Err(BchError::InvalidArgument(_))
            ));
        }

        // the boundary itself still decodes
        assert!(bch
            .decode_with(Received::Syndromes {
                data_len: bch.max_data_len(),
                syndromes: &syndromes,
            })
            .is_ok());
    }

    #[test]
    fn test_rejects_bad_syndromes() {
        let bch = codec();
        let short = [0u32; 7];
        assert!(bch
            .decode_with(Received::Syndromes {
                data_len: 16,
                syndromes: &short
            })
            .is_err());

        // a short nonzero set must be rejected before Berlekamp-Massey sees it
        let short_nonzero = [1u32, 2, 3];
        assert!(matches!(
            bch.decode_with(Received::Syndromes {
                data_len: 16,
                syndromes: &short_nonzero
            }),
            Err(BchError::InvalidArgument(_))
        ));

        let mut out_of_field = [0u32; 8];
        out_of_field[3] = 8192;
        assert!(bch
            .decode_with(Received::Syndromes {
                data_len: 16,
                syndromes: &out_of_field
            })
            .is_err());
    }

    #[test]
    fn test_compute_even_syndromes() {
        let bch = codec();
        let mut data = vec![0u8; 32];
        let ecc = bch.encode(&data, None).unwrap();
        data[7] ^= 0x04;
        let full = bch.syndromes(Received::Codeword { data: &data, ecc: &ecc }).unwrap();

        let mut odd_only = full.clone();
        for k in (1..odd_only.len()).step_by(2) {
            odd_only[k] = 0;
        }
        assert_eq!(bch.compute_even_syndromes(&odd_only).unwrap(), full);
        assert_eq!(bch.compute_even_syndromes(&full).unwrap(), full);
        assert!(bch.compute_even_syndromes(&full[..6]).is_err());
    }

    #[test]
    fn test_decode_in_place_repairs_both_buffers() {
        init_logger();
        let bch = codec();
        let original: Vec<u8> = (0..=255).collect();
        let original_ecc = bch.encode(&original, None).unwrap();

        let mut data = original.clone();
        let mut ecc = original_ecc.clone();
        data[0] ^= 0x80;
        data[255] ^= 0x01;
        ecc[0] ^= 0x02;
        ecc[6] ^= 0x20;

        let decoded = bch.decode_in_place(&mut data, &mut ecc).unwrap();
        assert_eq!(decoded.error_count(), 4);
        assert_eq!(data, original);
        assert_eq!(ecc, original_ecc);
    }
}
