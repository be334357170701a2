//! Generator polynomial construction
//!
//! g(x) is the least common multiple over GF(2)[x] of the minimal polynomials
//! of α^1 … α^2t. Conjugate roots (α^i, α^2i, α^4i, …) share one minimal
//! polynomial, so each cyclotomic coset is folded in exactly once.

use crate::error::{BchError, Result};
use crate::galois::GaloisField;
use log::trace;

/// Binary generator polynomial, bit-packed from the highest power down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorPolynomial {
    degree: usize,
    /// Coefficients of x^degree .. x^0, MSB-first
    packed: Vec<u8>,
}

impl GeneratorPolynomial {
    /// Build the generator for a code correcting `t` errors over `field`
    pub fn new(field: &GaloisField, t: usize) -> Result<Self> {
        if t == 0 {
            return Err(BchError::InvalidParameters(
                "correction strength t must be positive".to_string(),
            ));
        }

        let n = field.size() as usize;
        let mut covered = vec![false; n];
        // coefficient of x^k at index k
        let mut g = vec![true];

        for i in 1..=2 * t {
            let root = i % n;
            if covered[root] {
                continue;
            }

            let coset = cyclotomic_coset(root, n);
            for &member in &coset {
                covered[member] = true;
            }

            let minimal = minimal_polynomial(field, &coset)?;
            trace!(
                "folding minimal polynomial of alpha^{} (degree {})",
                root,
                minimal.len() - 1
            );
            g = multiply_binary(&g, &minimal);
        }

        let degree = g.len() - 1;
        if degree >= n || degree > field.order() as usize * t {
            return Err(BchError::InvalidParameters(format!(
                "generator degree {} is not realizable for n = {}, t = {}",
                degree, n, t
            )));
        }

        let mut packed = vec![0u8; (degree + 1).div_ceil(8)];
        for (k, &c) in g.iter().rev().enumerate() {
            if c {
                packed[k / 8] |= 0x80 >> (k % 8);
            }
        }

        Ok(GeneratorPolynomial { degree, packed })
    }

    /// Degree of g(x), which is the number of ecc bits
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Coefficient of x^power
    pub fn coefficient(&self, power: usize) -> bool {
        if power > self.degree {
            return false;
        }
        let k = self.degree - power;
        self.packed[k / 8] & (0x80 >> (k % 8)) != 0
    }

    /// Bit-packed coefficients, highest power first
    pub fn packed(&self) -> &[u8] {
        &self.packed
    }

    /// Evaluate g at a field element
    pub fn evaluate(&self, field: &GaloisField, x: u32) -> u32 {
        (0..=self.degree).rev().fold(0, |acc, power| {
            field.mul(acc, x) ^ u32::from(self.coefficient(power))
        })
    }

    /// g(x) without its leading term, left-justified into ceil(degree / 8) bytes
    ///
    /// Bit k (MSB-first) is the coefficient of x^(degree - 1 - k), which is
    /// the layout of an ecc remainder.
    pub(crate) fn taps(&self) -> Vec<u8> {
        let mut taps = vec![0u8; self.degree.div_ceil(8)];
        for k in 0..self.degree {
            if self.coefficient(self.degree - 1 - k) {
                taps[k / 8] |= 0x80 >> (k % 8);
            }
        }
        taps
    }
}

/// Exponents {r, 2r, 4r, ...} mod n
fn cyclotomic_coset(r: usize, n: usize) -> Vec<usize> {
    let mut coset = vec![r];
    let mut x = (2 * r) % n;
    while x != r {
        coset.push(x);
        x = (2 * x) % n;
    }
    coset
}

/// Product of (x + α^e) over a coset, which must land in GF(2)[x]
fn minimal_polynomial(field: &GaloisField, coset: &[usize]) -> Result<Vec<bool>> {
    let mut poly = vec![1u32];

    for &e in coset {
        let root = field.exp(e);
        let mut next = vec![0u32; poly.len() + 1];
        for (k, &c) in poly.iter().enumerate() {
            next[k + 1] ^= c;
            next[k] ^= field.mul(c, root);
        }
        poly = next;
    }

    poly.into_iter()
        .map(|c| match c {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(BchError::InvalidParameters(
                "minimal polynomial has coefficients outside GF(2)".to_string(),
            )),
        })
        .collect()
}

/// Multiply two polynomials over GF(2)
fn multiply_binary(a: &[bool], b: &[bool]) -> Vec<bool> {
    let mut result = vec![false; a.len() + b.len() - 1];

    for (i, &ai) in a.iter().enumerate() {
        if !ai {
            continue;
        }
        for (j, &bj) in b.iter().enumerate() {
            if bj {
                result[i + j] ^= true;
            }
        }
    }

    result
}
