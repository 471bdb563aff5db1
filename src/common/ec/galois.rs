use crate::common::error::{QRError, QRResult};

// GF(256) tables
//------------------------------------------------------------------------------

// Exponent table for the field generated by x^8 + x^4 + x^3 + x^2 + 1. Entry i
// is 2^i; the last entry wraps back to 1.
pub(crate) static EXP_TABLE: [u8; 256] = build_exp_table();

// Inverse of EXP_TABLE over [0, 255). Entry 0 is never read.
pub(crate) static LOG_TABLE: [u8; 256] = build_log_table();

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 8 {
        table[i] = 1 << i;
        i += 1;
    }
    while i < 256 {
        table[i] = table[i - 4] ^ table[i - 5] ^ table[i - 6] ^ table[i - 8];
        i += 1;
    }
    table
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Field element for exponent `n`. Any integer is accepted since the
/// multiplicative group has order 255.
pub fn gexp(n: i32) -> u8 {
    EXP_TABLE[n.rem_euclid(255) as usize]
}

/// Discrete logarithm of a nonzero field element.
pub fn glog(n: u8) -> QRResult<u8> {
    if n == 0 {
        return Err(QRError::LogOfZero);
    }
    Ok(LOG_TABLE[n as usize])
}
