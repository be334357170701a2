//! Error-locator polynomial by binary Berlekamp-Massey
//!
//! Over GF(2) every even-step discrepancy of the general algorithm is zero,
//! so only the t odd steps are run. Step i consumes S_(2i+1) and, when the
//! discrepancy is nonzero, adds `d / d_p · x^(2i - p) · σ_p(x)` to σ(x), where
//! σ_p is the locator saved at the last length change (step p).

use crate::error::Uncorrectable;
use crate::galois::GaloisField;

/// σ(x) = 1 + σ_1 x + ... + σ_L x^L, whose roots are inverse error positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLocator {
    /// Coefficient of x^k at index k
    coefficients: Vec<u32>,
    degree: usize,
}

impl ErrorLocator {
    /// Run Berlekamp-Massey over a full set of 2t syndromes
    ///
    /// Returns [`Uncorrectable::TooManyErrors`] when the shortest LFSR that
    /// generates the syndromes is longer than `t`. The caller guarantees
    /// `syndromes.len() == 2 * t`.
    pub(crate) fn solve(
        field: &GaloisField,
        syndromes: &[u32],
        t: usize,
    ) -> Result<Self, Uncorrectable> {
        debug_assert_eq!(syndromes.len(), 2 * t);

        let mut elp = ErrorLocator::one(2 * t + 1);
        let mut prev = ErrorLocator::one(2 * t + 1);
        let mut prev_discrepancy = 1u32;
        // 2p, or -1 before the first length change
        let mut prev_step: isize = -1;
        let mut discrepancy = syndromes[0];

        let mut i = 0;
        while i < t && elp.degree <= t {
            if discrepancy != 0 {
                let shift = (2 * i as isize - prev_step) as usize;
                let snapshot = elp.clone();
                let scale = field.div(discrepancy, prev_discrepancy);

                let needed = prev.degree + shift + 1;
                if elp.coefficients.len() < needed {
                    elp.coefficients.resize(needed, 0);
                }
                for j in 0..=prev.degree {
                    let c = prev.coefficients[j];
                    if c != 0 {
                        elp.coefficients[j + shift] ^= field.mul(scale, c);
                    }
                }

                let length = prev.degree + shift;
                if length > elp.degree {
                    elp.degree = length;
                    prev = snapshot;
                    prev_discrepancy = discrepancy;
                    prev_step = 2 * i as isize;
                }
            }

            if i + 1 < t {
                let next = 2 * i + 2;
                discrepancy = syndromes[next];
                for j in 1..=elp.degree.min(next) {
                    discrepancy ^= field.mul(elp.coefficients[j], syndromes[next - j]);
                }
            }

            i += 1;
        }

        if elp.degree > t {
            return Err(Uncorrectable::TooManyErrors {
                degree: elp.degree,
                t,
            });
        }

        elp.coefficients.truncate(elp.degree + 1);
        Ok(elp)
    }

    fn one(capacity: usize) -> Self {
        let mut coefficients = Vec::with_capacity(capacity);
        coefficients.push(1);
        ErrorLocator {
            coefficients,
            degree: 0,
        }
    }

    /// Claimed number of errors
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    #[inline]
    pub fn coefficients(&self) -> &[u32] {
        &self.coefficients
    }

    /// Evaluate σ at a field element
    pub fn evaluate(&self, field: &GaloisField, x: u32) -> u32 {
        self.coefficients
            .iter()
            .rev()
            .fold(0, |acc, &c| field.mul(acc, x) ^ c)
    }
}
