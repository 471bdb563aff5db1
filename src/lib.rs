//! # qrgrid
//!
//! A Rust library that encodes bytes into the module matrix of a QR code, with
//! Reed-Solomon error correction and penalty based mask selection. Rendering
//! the matrix to pixels, SVG or terminal output is left to the caller.
//!
//! ## Features
//!
//! - **Byte mode encoding**: Any byte sequence, UTF-8 text included
//! - **Automatic version selection**: Picks the smallest of the 40 versions that fits the data
//! - **Reed-Solomon Error Correction**: Levels L, M, Q & H
//! - **Mask selection**: Scores all 8 masks and keeps the lowest penalty, or uses a forced one
//!
//! ## Quick Start
//!
//! ### Simple Encoding
//!
//! ```rust
//! use qrgrid::{encode, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid = encode(b"HELLO", None, ECLevel::M)?;
//!
//! assert_eq!(grid.len(), 21);
//! assert!(grid.iter().all(|row| row.len() == 21));
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrgrid::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = "Hello, World!";
//! let qr = QRBuilder::new(data.as_bytes())
//!     .version(Version::new(2)?)        // QR version (size) - if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)             // Error correction level - if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)       // Mask pattern - if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! assert_eq!(qr.width(), 25);
//! assert_eq!(qr.metadata(), "{ Version: 2, Ec level: Q, Mask: 3 }");
//! # Ok(())
//! # }
//! ```
//!
//! ### Inspecting the mask penalty
//!
//! ```rust
//! use qrgrid::{compute_penalty, QRBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new(b"HELLO").build()?;
//! let penalty = compute_penalty(&qr);
//! assert!(penalty.total() > 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Logging
//!
//! Pipeline stages are logged through the [`log`] facade at `debug` level and
//! every mask trial at `trace` level. No logger is installed by the library.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{Module, QRBuilder, QR};
pub use common::error::{QRError, QRResult};
pub use common::mask::{compute_penalty, MaskPattern, Penalty};
pub use common::metadata::{Color, ECLevel, Version};

/// Encodes `data` into rows of modules, dark as `true`. A `None` version picks
/// the smallest version that fits.
pub fn encode(data: &[u8], version: Option<Version>, ec_level: ECLevel) -> QRResult<Vec<Vec<bool>>> {
    let mut builder = QRBuilder::new(data);
    builder.ec_level(ec_level);
    if let Some(v) = version {
        builder.version(v);
    }
    Ok(builder.build()?.to_bools())
}
