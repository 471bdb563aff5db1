use std::ops::Deref;
use std::str::FromStr;

use super::bch::bch_type_number;
use super::ec::Block;
use super::error::{QRError, QRResult};
use super::version_db::{ALIGNMENT_PATTERN_POSITIONS, RS_BLOCK_TABLE};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(40);

    pub fn new(version: usize) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion(version)),
        }
    }

    /// All versions in increasing order of size.
    pub fn all() -> impl Iterator<Item = Self> {
        (*Self::MIN..=*Self::MAX).map(Self)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    /// Width of the byte mode character count field.
    pub const fn char_cnt_bits(self) -> usize {
        if self.0 < 10 {
            8
        } else {
            16
        }
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 - 1]
    }

    /// BCH(18, 6) encoded version number.
    pub fn info(self) -> u32 {
        bch_type_number(self.0 as u32)
    }

    /// Block descriptors, shorter blocks first.
    pub fn rs_blocks(self, ecl: ECLevel) -> Vec<Block> {
        let row = RS_BLOCK_TABLE[self.0 - 1][ecl as usize];
        let mut blocks = Vec::with_capacity(row[0] + row[3]);
        for group in row.chunks_exact(3) {
            let (count, len, dlen) = (group[0], group[1], group[2]);
            blocks.extend((0..count).map(|_| Block::new(len, dlen)));
        }
        blocks
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        let row = RS_BLOCK_TABLE[self.0 - 1][ecl as usize];
        row[0] * row[2] + row[3] * row[5]
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    pub fn total_codewords(self) -> usize {
        let row = RS_BLOCK_TABLE[self.0 - 1][0];
        row[0] * row[1] + row[3] * row[4]
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        let row = RS_BLOCK_TABLE[self.0 - 1][ecl as usize];
        row[1] - row[2]
    }

    /// Number of codeword errors the EC codewords can correct, leaving aside
    /// the misdecode protection codewords of the smallest symbols.
    pub fn ec_capacity(self, ecl: ECLevel) -> usize {
        let p = match (self.0, ecl) {
            (1, ECLevel::L) => 3,
            (2, ECLevel::L) | (1, ECLevel::M) => 2,
            (1, _) | (3, ECLevel::L) => 1,
            _ => 0,
        };
        let ec_bytes = self.total_codewords() - self.data_codewords(ecl);
        (ec_bytes - p) / 2
    }
}


// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    /// Two bit field written into the format information.
    pub fn format_bits(self) -> u32 {
        (self as u32) ^ 1
    }
}

impl TryFrom<char> for ECLevel {
    type Error = QRError;
    fn try_from(c: char) -> QRResult<Self> {
        match c.to_ascii_uppercase() {
            'L' => Ok(Self::L),
            'M' => Ok(Self::M),
            'Q' => Ok(Self::Q),
            'H' => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel(c.to_string())),
        }
    }
}

impl FromStr for ECLevel {
    type Err = QRError;
    fn from_str(s: &str) -> QRResult<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(QRError::InvalidECLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod ec_level_tests {
    use super::ECLevel;
    use crate::common::error::QRError;

    #[test]
    fn test_format_bits() {
        assert_eq!(ECLevel::L.format_bits(), 1);
        assert_eq!(ECLevel::M.format_bits(), 0);
        assert_eq!(ECLevel::Q.format_bits(), 3);
        assert_eq!(ECLevel::H.format_bits(), 2);
    }

    #[test]
    fn test_parse() {
        assert_eq!("L".parse::<ECLevel>(), Ok(ECLevel::L));
        assert_eq!("q".parse::<ECLevel>(), Ok(ECLevel::Q));
        assert_eq!(ECLevel::try_from('h'), Ok(ECLevel::H));
        assert_eq!("X".parse::<ECLevel>(), Err(QRError::InvalidECLevel("X".to_string())));
        assert_eq!("LM".parse::<ECLevel>(), Err(QRError::InvalidECLevel("LM".to_string())));
        assert_eq!("".parse::<ECLevel>(), Err(QRError::InvalidECLevel(String::new())));
    }
}
