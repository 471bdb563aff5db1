use thiserror::Error;

use super::metadata::ECLevel;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum QRError {
    /// No version up to 40 holds the payload at the requested level
    #[error("Data too long: {len} bytes do not fit in any version at ec level {ec_level:?}")]
    InputTooLarge { len: usize, ec_level: ECLevel },

    /// Bitstream would not fit in the data capacity of the chosen version
    #[error("Capacity overflow: {required} bits required but only {capacity} bits available")]
    CapacityExceeded { required: usize, capacity: usize },

    /// Logarithm of zero requested in GF(256)
    #[error("Logarithm of zero is undefined in GF(256)")]
    LogOfZero,

    #[error("Invalid version: {0}")]
    InvalidVersion(usize),

    #[error("Invalid error correction level: {0:?}")]
    InvalidECLevel(String),

    #[error("Invalid masking pattern: {0}")]
    InvalidMaskPattern(u8),
}

pub type QRResult<T> = Result<T, QRError>;
