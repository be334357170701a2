//! Binary BCH forward error correction
//!
//! Encode ecc for a block of data, then locate and correct up to `t` bit
//! flips anywhere in `data ‖ ecc`:
//!
//! ```
//! use bchrs::Bch;
//!
//! let bch = Bch::new(4, None, Some(13), false)?;
//! let data = vec![0u8; 512];
//! let ecc = bch.encode(&data, None)?;
//!
//! let mut received = data.clone();
//! received[4] ^= 0x20;
//! let decoded = bch.decode(&received, &ecc)?;
//! assert_eq!(decoded.error_locations(), Some(&[37][..]));
//!
//! bch.correct(&mut received, None, &decoded.into_locations()?)?;
//! assert_eq!(received, data);
//! # Ok::<(), bchrs::BchError>(())
//! ```

pub mod bch;
pub mod bit_order;
pub mod error;
pub mod galois;

pub use bch::{Bch, BchConfig, Decoded, Received};
pub use bit_order::{reverse_bits, BitOrder};
pub use error::{BchError, Result, Uncorrectable};
pub use galois::GaloisField;
