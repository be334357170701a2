//! Applying located bit flips to caller buffers

use crate::error::{BchError, Result, Uncorrectable};

/// Flip every located bit of the block `data ‖ ecc`
///
/// Location `b` addresses `buf[b / 8] & (1 << (b % 8))` of the concatenated
/// block. All locations are checked before any buffer is touched, so a bad
/// list never leaves a half-corrected block behind. Locations in the ecc
/// region are skipped when no ecc buffer is given.
///
/// Returns the number of bits flipped.
pub fn apply_corrections(
    data: &mut [u8],
    mut ecc: Option<&mut [u8]>,
    ecc_bytes: usize,
    locations: &[usize],
) -> Result<usize> {
    if let Some(ecc) = ecc.as_deref() {
        if ecc.len() != ecc_bytes {
            return Err(BchError::InvalidArgument(format!(
                "ecc buffer is {} bytes, expected {}",
                ecc.len(),
                ecc_bytes
            )));
        }
    }

    let data_bits = data.len() * 8;
    let limit = data_bits + ecc_bytes * 8;
    if let Some(&location) = locations.iter().find(|&&b| b >= limit) {
        return Err(Uncorrectable::OutOfRange { location, limit }.into());
    }

    let mut applied = 0;
    for &b in locations {
        let mask = 1u8 << (b % 8);
        if b < data_bits {
            data[b / 8] ^= mask;
            applied += 1;
        } else if let Some(ecc) = ecc.as_deref_mut() {
            ecc[(b - data_bits) / 8] ^= mask;
            applied += 1;
        }
    }

    Ok(applied)
}
