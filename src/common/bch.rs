use super::mask::MaskPattern;
use super::metadata::ECLevel;

// BCH codes for format & version info
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;
pub const VERSION_INFO_BIT_LEN: usize = 18;

const G15: u32 = 0b101_0011_0111;
const G18: u32 = 0b1_1111_0010_0101;
const G15_MASK: u32 = 0b101_0100_0001_0010;

// Bit length, not degree
fn bch_digit(data: u32) -> u32 {
    u32::BITS - data.leading_zeros()
}

fn bch_rem(mut dividend: u32, generator: u32) -> u32 {
    while bch_digit(dividend) >= bch_digit(generator) {
        dividend ^= generator << (bch_digit(dividend) - bch_digit(generator));
    }
    dividend
}

/// BCH(15, 5) codeword of a 5 bit format field, XORed with the format mask.
pub fn bch_type_info(data: u32) -> u32 {
    ((data << 10) | bch_rem(data << 10, G15)) ^ G15_MASK
}

/// BCH(18, 6) codeword of a 6 bit version number.
pub fn bch_type_number(data: u32) -> u32 {
    (data << 12) | bch_rem(data << 12, G18)
}

pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> u32 {
    bch_type_info(ecl.format_bits() << 3 | *mask as u32)
}
