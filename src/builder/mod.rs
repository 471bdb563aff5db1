pub(crate) mod ec;
mod qr;

pub use qr::{Module, Pass, QR};

use std::ops::Deref;

use log::debug;

use crate::common::{
    bit_utils::BitStream,
    codec::{encode, encode_with_version},
    error::QRResult,
    mask::{find_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};
use ec::ecc;

pub(crate) fn metadata_str(ver: Option<Version>, ecl: ECLevel, mask: Option<MaskPattern>) -> String {
    let ver = ver.map_or("None".to_string(), |v| (*v).to_string());
    let mask = mask.map_or("None".to_string(), |m| (*m).to_string());
    format!("{{ Version: {ver}, Ec level: {ecl:?}, Mask: {mask} }}")
}

pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        metadata_str(self.version, self.ec_level, self.mask)
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}", self.metadata());

        // Encode data
        debug!("Encoding data...");
        let (encoded_data, version) = match self.version {
            Some(v) => (encode_with_version(self.data, v, self.ec_level)?, v),
            None => {
                debug!("Finding best version...");
                encode(self.data, self.ec_level)?
            }
        };

        // Compute error correction codewords & interleave
        debug!("Constructing payload with ecc & interleaving...");
        let (data_blocks, ecc_blocks) = ecc(encoded_data.data(), version, self.ec_level)?;
        let mut payload = BitStream::new(version.total_codewords() << 3);
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));

        let mask = match self.mask {
            Some(m) => m,
            None => {
                debug!("Finding best mask...");
                find_best_mask(version, self.ec_level, &payload)
            }
        };

        debug!("Drawing QR with mask {}...", *mask);
        let mut qr = QR::new(version, self.ec_level);
        qr.draw_all(&payload, mask, Pass::Final);

        let total_modules = version.width() * version.width();
        let dark_modules = qr.count_dark_modules();
        let light_modules = total_modules - dark_modules;
        let data_capacity = version.data_codewords(self.ec_level);

        debug!("Report: {}", qr.metadata());
        debug!(
            "Data capacity: {}, Error capacity: {}",
            data_capacity,
            version.ec_capacity(self.ec_level)
        );
        debug!(
            "Data size: {}, Encoded size: {}, Utilization: {}%",
            self.data.len(),
            encoded_data.len() >> 3,
            self.data.len() * 100 / data_capacity
        );
        debug!(
            "Dark cells: {}, Light cells: {}, Balance: {}",
            dark_modules,
            light_modules,
            dark_modules * 100 / total_modules
        );

        Ok(qr)
    }

    /// Takes the i-th element of every block in turn. Exhausted blocks are
    /// skipped.
    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}
