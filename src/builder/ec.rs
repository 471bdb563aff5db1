use log::debug;

use crate::common::{
    ec::{gexp, Polynomial},
    error::QRResult,
    metadata::{ECLevel, Version},
};

// ECC: Error Correction Codeword generator
pub fn ecc(data: &[u8], version: Version, ec_level: ECLevel) -> QRResult<(Vec<&[u8]>, Vec<Vec<u8>>)> {
    let data_blocks = blockify(data, version, ec_level);

    let ecc_size_per_block = version.ecc_per_block(ec_level);
    let gen_poly = generator_polynomial(ecc_size_per_block)?;
    let ecc_blocks = data_blocks
        .iter()
        .map(|b| ecc_per_block(b, &gen_poly))
        .collect::<QRResult<Vec<_>>>()?;

    debug!(
        "Computed {} ec codewords for each of {} blocks",
        ecc_size_per_block,
        data_blocks.len()
    );
    Ok((data_blocks, ecc_blocks))
}

/// Splits data codewords sequentially by the block descriptors of the
/// version & level.
pub fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let blocks = version.rs_blocks(ec_level);
    let total_size = blocks.iter().map(|b| b.data_len()).sum::<usize>();

    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut offset = 0;
    let mut data_blocks = Vec::with_capacity(blocks.len());
    for b in blocks {
        data_blocks.push(&data[offset..offset + b.data_len()]);
        offset += b.data_len();
    }
    data_blocks
}

/// Product of (x - a^i) for i in 0..ecc_count.
pub fn generator_polynomial(ecc_count: usize) -> QRResult<Polynomial> {
    let mut res = Polynomial::new(&[1], 0);
    for i in 0..ecc_count {
        res = res.multiply(&Polynomial::new(&[1, gexp(i as i32)], 0))?;
    }
    Ok(res)
}

// Remainder of the data polynomial, shifted by the ecc count, on division by
// the generator polynomial. Short remainders are zero filled from the front.
fn ecc_per_block(block: &[u8], gen_poly: &Polynomial) -> QRResult<Vec<u8>> {
    let ecc_count = gen_poly.len() - 1;
    let rem = Polynomial::new(block, ecc_count).rem(gen_poly)?;

    let mut res = vec![0; ecc_count];
    let pad = ecc_count - rem.len();
    res[pad..].copy_from_slice(rem.coeffs());
    Ok(res)
}
