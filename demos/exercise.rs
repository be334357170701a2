//! Encode a random page, hit it with t bit flips, then decode and correct
//!
//! Runs the same exercise over several codes. `RUST_LOG=debug` shows the
//! codec configuration and any uncorrectable words.

use anyhow::{ensure, Context, Result};
use bchrs::{Bch, BchConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn exercise(config: BchConfig, rng: &mut StdRng) -> Result<()> {
    let bch = config.build().context("building codec")?;
    let max_data_len = bch.n() / 8 - bch.ecc_bytes();

    println!("{}", bch);
    println!("  max_data_len: {}", max_data_len);
    println!("  ecc_bits: {} (ecc_bytes: {})", bch.ecc_bits(), bch.ecc_bytes());
    println!("  polynomial: {:#x}", bch.polynomial());

    let data: Vec<u8> = (0..max_data_len).map(|_| rng.random()).collect();
    let ecc = bch.encode(&data, None)?;
    println!("  encoded ecc: {}", hex::encode(&ecc));

    // flip t distinct bits of the packet, keeping clear of the ecc pad bits
    let nbits = max_data_len * 8 + bch.ecc_bits();
    let mut packet = [data.as_slice(), ecc.as_slice()].concat();
    for s in rand::seq::index::sample(rng, nbits, bch.t()) {
        let bit = if bch.bit_order().swaps_bits() {
            s
        } else {
            (s & !7) | (7 - (s & 7))
        };
        packet[bit / 8] ^= 1 << (bit % 8);
    }

    let (received, received_ecc) = packet.split_at_mut(max_data_len);
    let decoded = bch.decode_in_place(received, received_ecc)?;
    println!("  nerr: {}", decoded.error_count());
    println!("  errloc: {:?}", decoded.error_locations().unwrap_or_default());

    ensure!(received == data.as_slice(), "data not restored");
    ensure!(received_ecc == ecc.as_slice(), "ecc not restored");
    println!("  corrected");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()
        .context("seed must be an integer")?
        .unwrap_or(0x5eed);
    let mut rng = StdRng::seed_from_u64(seed);

    let configs = [
        BchConfig::new(6).with_polynomial(487),
        BchConfig::new(12).with_polynomial(17475).swap_bits(true),
        BchConfig::new(16).with_order(13),
        BchConfig::new(32).with_order(14),
        BchConfig::new(64).with_order(15),
    ];

    for config in configs {
        exercise(config, &mut rng)?;
    }
    Ok(())
}
