//! Hashrate and currency unit conversions.

use strum::{Display, EnumIter};

use crate::error::{Error, Result};

/// Gwei to ether ratio.
pub const GWEI_TO_ETH_RATIO: f64 = 1e-9;

/// Hashrate magnitude tier, per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum HashrateUnit {
    #[strum(to_string = "H/s")]
    Hashes,
    #[strum(to_string = "KH/s")]
    KiloHashes,
    #[strum(to_string = "MH/s")]
    MegaHashes,
    #[strum(to_string = "GH/s")]
    GigaHashes,
    #[strum(to_string = "TH/s")]
    TeraHashes,
    #[strum(to_string = "PH/s")]
    PetaHashes,
}

impl HashrateUnit {
    /// Power of ten relative to hashes per second.
    pub const fn exponent(self) -> u32 {
        match self {
            HashrateUnit::Hashes => 0,
            HashrateUnit::KiloHashes => 3,
            HashrateUnit::MegaHashes => 6,
            HashrateUnit::GigaHashes => 9,
            HashrateUnit::TeraHashes => 12,
            HashrateUnit::PetaHashes => 15,
        }
    }

    const fn scale(self) -> u128 {
        10u128.pow(self.exponent())
    }
}

/// Convert `value` from one hashrate unit to another.
///
/// The value is first scaled up to hashes per second, then divided down to
/// the target unit with integer truncation. Down-conversions therefore lose
/// the remainder (1 H/s is 0 GH/s) and a chain of conversions is not
/// invertible in general.
///
/// The intermediate is 128 bits wide, so only a final result above
/// `u64::MAX` fails.
pub fn convert_hashrate(value: u64, from: HashrateUnit, to: HashrateUnit) -> Result<u64> {
    let hashes = u128::from(value) * from.scale();
    u64::try_from(hashes / to.scale()).map_err(|_| Error::HashrateOverflow)
}

pub fn gwei_to_eth(gwei: u64) -> f64 {
    gwei as f64 * GWEI_TO_ETH_RATIO
}

/// Inverse of [`gwei_to_eth`].
///
/// Rounds to the nearest gwei, so `eth_to_gwei(gwei_to_eth(x)) == x` holds
/// for every `x <= 2^51`. Above that the two roundings through `f64` can
/// land one gwei off. Negative and NaN inputs saturate to zero.
pub fn eth_to_gwei(eth: f64) -> u64 {
    (eth / GWEI_TO_ETH_RATIO).round() as u64
}

/// Render a duration in seconds as `HH:MM:SS`.
///
/// Hours are not wrapped at 24 and widen past two digits when needed.
pub fn format_hms(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds / 60) % 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
