//! Codec configuration
//!
//! A [`BchConfig`] names the code (t, field polynomial and/or order, bit
//! order). [`BchConfig::build`] resolves the missing pieces and produces a
//! ready [`Bch`]; a failed build yields no codec at all.

use log::debug;

use super::codec::Bch;
use super::encoder::Encoder;
use super::generator::GeneratorPolynomial;
use crate::bit_order::BitOrder;
use crate::error::{BchError, Result};
use crate::galois::GaloisField;

/// Parameters of a binary BCH code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BchConfig {
    /// Number of correctable bit errors
    pub t: usize,
    /// Primitive polynomial as a bitmask (`Some(0)` counts as absent)
    pub polynomial: Option<u32>,
    /// Field order m; derived from the polynomial when absent
    pub order: Option<u32>,
    pub bit_order: BitOrder,
}

impl BchConfig {
    /// Code correcting `t` errors; the field must still be chosen
    pub fn new(t: usize) -> Self {
        Self {
            t,
            polynomial: None,
            order: None,
            bit_order: BitOrder::MsbFirst,
        }
    }

    /// Use this primitive polynomial (bitmask, x^m term included)
    pub fn with_polynomial(mut self, polynomial: u32) -> Self {
        self.polynomial = Some(polynomial);
        self
    }

    /// Use GF(2^order)
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Bit order of data and ecc bytes
    pub fn with_bit_order(mut self, bit_order: BitOrder) -> Self {
        self.bit_order = bit_order;
        self
    }

    /// Shorthand for [`BitOrder::from_swap_bits`]
    pub fn swap_bits(self, swap_bits: bool) -> Self {
        self.with_bit_order(BitOrder::from_swap_bits(swap_bits))
    }

    /// Resolve (order, polynomial) from whichever of the two was given
    fn resolve_field(&self) -> Result<(u32, u32)> {
        let polynomial = self.polynomial.filter(|&p| p != 0);

        match (self.order, polynomial) {
            (None, None) => Err(BchError::InvalidParameters(
                "either a primitive polynomial or a field order is required".to_string(),
            )),
            (Some(order), None) => {
                let polynomial = GaloisField::default_polynomial(order).ok_or_else(|| {
                    BchError::InvalidParameters(format!(
                        "no default primitive polynomial for m = {}",
                        order
                    ))
                })?;
                Ok((order, polynomial))
            }
            (None, Some(polynomial)) => Ok((GaloisField::order_of(polynomial), polynomial)),
            (Some(order), Some(polynomial)) => Ok((order, polynomial)),
        }
    }

    /// Build the field, generator and encoder tables
    pub fn build(&self) -> Result<Bch> {
        let (order, polynomial) = self.resolve_field()?;
        let field = GaloisField::new(order, polynomial)?;

        let n = field.size() as usize;
        if self.t == 0 || order as usize * self.t >= n {
            return Err(BchError::InvalidParameters(format!(
                "t = {} is not supported over GF(2^{}) (need 0 < m*t < {})",
                self.t, order, n
            )));
        }

        let generator = GeneratorPolynomial::new(&field, self.t)?;
        let encoder = Encoder::new(&generator);

        debug!(
            "BCH configured: m={}, t={}, polynomial={:#x}, ecc_bits={}, bit_order={:?}",
            order,
            self.t,
            polynomial,
            generator.degree(),
            self.bit_order
        );

        Ok(Bch::from_parts(
            self.t,
            field,
            generator,
            encoder,
            self.bit_order,
        ))
    }
}
