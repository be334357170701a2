//! Binary BCH codec
//!
//! A BCH code over GF(2^m) with design strength t corrects any t bit errors
//! in a codeword of up to n = 2^m - 1 bits. Stages, in pipeline order:
//!
//! - [`generator`]: g(x) from the minimal polynomials of α^1 .. α^2t
//! - [`encoder`]: systematic ecc by byte-table polynomial division
//! - [`syndrome`]: syndromes of the received remainder
//! - [`locator`]: error-locator polynomial by Berlekamp-Massey
//! - [`chien`]: roots of the locator, i.e. error positions
//! - [`correct`]: bit flips applied to caller buffers
//!
//! [`Bch`] ties them together behind encode/decode/correct.

pub mod chien;
pub mod codec;
pub mod config;
pub mod correct;
pub mod encoder;
pub mod generator;
pub mod locator;
pub mod syndrome;

pub use codec::{Bch, Decoded, Received};
pub use config::BchConfig;
pub use generator::GeneratorPolynomial;
pub use locator::ErrorLocator;
