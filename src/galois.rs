//! Galois Field GF(2^m) arithmetic for BCH codes
//!
//! The field order is chosen at runtime (5 ≤ m ≤ 15) together with a primitive
//! polynomial of degree m. Elements are stored as `u32` bit patterns; the
//! primitive element α is the pattern `2` (the polynomial `x`).
//!
//! Multiplication and division go through log/antilog tables. The antilog
//! table is doubled so `exp[log a + log b]` never needs a modulo.

use crate::error::{BchError, Result};

/// Smallest supported field order
pub const MIN_ORDER: u32 = 5;

/// Largest supported field order
pub const MAX_ORDER: u32 = 15;

/// Known-good primitive polynomials for m = 5..=15
const DEFAULT_POLYNOMIALS: [u32; 11] = [
    0x25, 0x43, 0x83, 0x11d, 0x211, 0x409, 0x805, 0x1053, 0x201b, 0x402b, 0x8003,
];

/// Log/antilog tables for GF(2^m)
#[derive(Debug, Clone)]
pub struct GaloisField {
    order: u32,
    polynomial: u32,
    /// n = 2^m - 1, the multiplicative group order
    size: u32,
    log_table: Vec<u32>,
    exp_table: Vec<u32>, // 2n entries to avoid modulo in mul
}

impl GaloisField {
    /// Build the field GF(2^order) from a primitive polynomial of degree `order`
    pub fn new(order: u32, polynomial: u32) -> Result<Self> {
        if !(MIN_ORDER..=MAX_ORDER).contains(&order) {
            return Err(BchError::InvalidParameters(format!(
                "field order m = {} is outside {}..={}",
                order, MIN_ORDER, MAX_ORDER
            )));
        }

        if Self::order_of(polynomial) != order {
            return Err(BchError::InvalidParameters(format!(
                "polynomial {:#x} has degree {}, expected {}",
                polynomial,
                Self::order_of(polynomial),
                order
            )));
        }

        let size = (1u32 << order) - 1;
        let mut gf = GaloisField {
            order,
            polynomial,
            size,
            log_table: vec![0; size as usize + 1],
            exp_table: vec![0; 2 * size as usize],
        };
        gf.build_tables()?;
        Ok(gf)
    }

    /// Build GF(2^order) using the built-in primitive polynomial for that order
    pub fn with_default_polynomial(order: u32) -> Result<Self> {
        let polynomial = Self::default_polynomial(order).ok_or_else(|| {
            BchError::InvalidParameters(format!(
                "no default primitive polynomial for m = {}",
                order
            ))
        })?;
        Self::new(order, polynomial)
    }

    /// Default primitive polynomial for an order in 5..=15
    pub fn default_polynomial(order: u32) -> Option<u32> {
        if (MIN_ORDER..=MAX_ORDER).contains(&order) {
            Some(DEFAULT_POLYNOMIALS[(order - MIN_ORDER) as usize])
        } else {
            None
        }
    }

    /// Degree of a polynomial given as a bitmask (0 for the zero polynomial)
    pub fn order_of(polynomial: u32) -> u32 {
        if polynomial == 0 {
            0
        } else {
            31 - polynomial.leading_zeros()
        }
    }

    /// Build logarithm and exponential tables, rejecting non-primitive polynomials
    fn build_tables(&mut self) -> Result<()> {
        let n = self.size as usize;
        let carry = 1u32 << self.order;
        let mut value = 1u32;

        for i in 0..n {
            if i != 0 && value == 1 {
                // alpha^i = 1 with 0 < i < n: alpha does not generate the group
                return Err(BchError::InvalidParameters(format!(
                    "polynomial {:#x} is not primitive (alpha has order {})",
                    self.polynomial, i
                )));
            }
            self.exp_table[i] = value;
            self.exp_table[i + n] = value;
            self.log_table[value as usize] = i as u32;

            value <<= 1;
            if value & carry != 0 {
                value ^= self.polynomial;
            }
        }

        if value != 1 {
            return Err(BchError::InvalidParameters(format!(
                "polynomial {:#x} is not primitive",
                self.polynomial
            )));
        }

        // log(0) is undefined; n is never a valid logarithm
        self.log_table[0] = self.size;
        Ok(())
    }

    /// Field order m
    #[inline]
    pub fn order(&self) -> u32 {
        self.order
    }

    /// n = 2^m - 1
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Primitive polynomial defining the field
    #[inline]
    pub fn polynomial(&self) -> u32 {
        self.polynomial
    }

    /// alpha^power, for any power (reduced mod n)
    #[inline]
    pub fn exp(&self, power: usize) -> u32 {
        self.exp_table[power % self.size as usize]
    }

    /// Discrete logarithm of a nonzero element; returns n for zero
    #[inline]
    pub fn log(&self, a: u32) -> u32 {
        self.log_table[a as usize]
    }

    /// Multiply two elements
    #[inline]
    pub fn mul(&self, a: u32, b: u32) -> u32 {
        if a == 0 || b == 0 {
            return 0;
        }

        let log_a = self.log_table[a as usize] as usize;
        let log_b = self.log_table[b as usize] as usize;
        self.exp_table[log_a + log_b]
    }

    /// Divide two elements
    #[inline]
    pub fn div(&self, a: u32, b: u32) -> u32 {
        if b == 0 {
            panic!("Division by zero in GF(2^{})", self.order);
        }
        if a == 0 {
            return 0;
        }

        let n = self.size as usize;
        let log_a = self.log_table[a as usize] as usize;
        let log_b = self.log_table[b as usize] as usize;
        self.exp_table[log_a + n - log_b]
    }

    /// Multiplicative inverse of a nonzero element
    #[inline]
    pub fn inv(&self, a: u32) -> u32 {
        self.div(1, a)
    }

    /// a^2, a linear map in characteristic 2
    #[inline]
    pub fn square(&self, a: u32) -> u32 {
        if a == 0 {
            return 0;
        }
        self.exp(2 * self.log_table[a as usize] as usize)
    }

    /// Raise an element to a power
    #[inline]
    pub fn pow(&self, base: u32, exponent: u32) -> u32 {
        if exponent == 0 {
            return 1;
        }
        if base == 0 {
            return 0;
        }

        let log_base = self.log_table[base as usize] as u64;
        let log_result = (log_base * exponent as u64) % self.size as u64;
        self.exp_table[log_result as usize]
    }
}
