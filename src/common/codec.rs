use log::{debug, trace};

use super::bit_utils::BitStream;
use super::error::{QRError, QRResult};
use super::metadata::{ECLevel, Version};

pub use writer::{pad_remaining_capacity, push_segment, push_terminator};

// Mode
//------------------------------------------------------------------------------

pub const MODE_BITS: usize = 4;

pub const PADDING_CODEWORDS: [u8; 2] = [0b11101100, 0b00010001];

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Byte = 0b0100,
}

// Segment
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Segment<'a> {
    pub mode: Mode,
    pub len_bits: usize,
    pub data: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn new(data: &'a [u8], ver: Version) -> Self {
        Self { mode: Mode::Byte, len_bits: ver.char_cnt_bits(), data }
    }

    /// Bits taken by mode indicator, count field & payload, without padding.
    pub fn bit_len(&self) -> usize {
        MODE_BITS + self.len_bits + (self.data.len() << 3)
    }
}


// Encoder
//------------------------------------------------------------------------------

/// Picks the smallest version that fits `data` and assembles its padded
/// bitstream.
pub fn encode(data: &[u8], ecl: ECLevel) -> QRResult<(BitStream, Version)> {
    let ver = find_version(data, ecl)?;
    let bs = encode_with_version(data, ver, ecl)?;
    Ok((bs, ver))
}

pub fn encode_with_version(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
    let bcap = ver.data_bit_capacity(ecl);
    let seg = Segment::new(data, ver);
    let sz = seg.bit_len();
    if sz > bcap {
        return Err(QRError::CapacityExceeded { required: sz, capacity: bcap });
    }

    let mut bs = BitStream::new(bcap);
    push_segment(seg, &mut bs);
    push_terminator(&mut bs);
    pad_remaining_capacity(&mut bs);
    debug!("Encoded {} bytes into {} bits for version {}", data.len(), bs.len(), *ver);
    Ok(bs)
}

pub fn find_version(data: &[u8], ecl: ECLevel) -> QRResult<Version> {
    Version::all()
        .find(|&ver| {
            let sz = Segment::new(data, ver).bit_len();
            let bcap = ver.data_bit_capacity(ecl);
            trace!("Trying version {}: {sz} of {bcap} bits", *ver);
            sz <= bcap
        })
        .ok_or(QRError::InputTooLarge { len: data.len(), ec_level: ecl })
}


// Writer
//------------------------------------------------------------------------------

pub(super) mod writer {
    use super::{Segment, MODE_BITS, PADDING_CODEWORDS};
    use crate::common::bit_utils::BitStream;

    pub fn push_segment(seg: Segment, out: &mut BitStream) {
        push_header(&seg, out);
        out.extend(seg.data);
    }

    fn push_header(seg: &Segment, out: &mut BitStream) {
        out.push_bits(seg.mode as u8, MODE_BITS);
        let char_cnt = seg.data.len();
        debug_assert!(
            char_cnt < (1 << seg.len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {}",
            seg.len_bits
        );
        out.push_bits(char_cnt as u16, seg.len_bits);
    }

    /// Terminator is only written when all 4 of its bits fit.
    pub fn push_terminator(out: &mut BitStream) {
        if out.len() + 4 <= out.capacity() {
            out.push_bits(0u8, 4);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0u8, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(
            offset == 0,
            "Bit offset should be zero before padding codewords: {}",
            offset
        );

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

    #[cfg(test)]
    mod writer_tests {
        use super::{
            push_header, push_padding_bits, push_padding_codewords, push_segment,
            push_terminator, PADDING_CODEWORDS,
        };
        use crate::common::bit_utils::BitStream;
        use crate::common::codec::Segment;
        use crate::common::metadata::{ECLevel, Version};

        #[test]
        fn test_push_header_v1() {
            let ver = Version::new(1).unwrap();
            let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
            let data = vec![0; 255];
            push_header(&Segment::new(&data, ver), &mut bs);
            assert_eq!(bs.data(), [0b01001111, 0b11110000]);
            assert_eq!(bs.len(), 12);
        }

        #[test]
        fn test_push_header_v10() {
            let ver = Version::new(10).unwrap();
            let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
            let data = vec![0; 300];
            push_header(&Segment::new(&data, ver), &mut bs);
            assert_eq!(bs.data(), [0b01000000, 0b00010010, 0b11000000]);
            assert_eq!(bs.len(), 20);
        }

        #[test]
        fn test_push_segment() {
            let ver = Version::new(1).unwrap();
            let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
            push_segment(Segment::new(b"a", ver), &mut bs);
            assert_eq!(bs.data(), [0b01000000, 0b00010110, 0b00010000]);
            assert_eq!(bs.len(), 20);
        }

        #[test]
        fn test_push_terminator() {
            let ver = Version::new(1).unwrap();
            let bit_capacity = ver.data_bit_capacity(ECLevel::L);
            let mut bs = BitStream::new(bit_capacity);
            bs.push_bits(0b1u8, 1);
            push_terminator(&mut bs);
            assert_eq!(bs.data(), [0b10000000]);
            assert_eq!(bs.len(), 5);
            while bs.len() < bit_capacity - 3 {
                bs.push(true);
            }
            push_terminator(&mut bs);
            assert_eq!(bs.len(), bit_capacity - 3);
        }

        #[test]
        fn test_push_padding_bits() {
            let ver = Version::new(1).unwrap();
            let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
            bs.push_bits(0b1u8, 1);
            push_padding_bits(&mut bs);
            assert_eq!(bs.data(), [0b10000000]);
            assert_eq!(bs.len() & 7, 0);
        }

        #[test]
        fn test_push_padding_codewords() {
            let ver = Version::new(1).unwrap();
            let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
            bs.push_bits(0b1u8, 1);
            push_padding_bits(&mut bs);
            push_padding_codewords(&mut bs);
            let mut output = vec![0b10000000];
            output.extend(PADDING_CODEWORDS.iter().cycle().take(18));
            assert_eq!(bs.data(), output);
        }

        #[test]
        fn test_padding_ends_mid_alternation() {
            let ver = Version::new(1).unwrap();
            let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::L));
            bs.extend(&[0; 2]);
            push_padding_codewords(&mut bs);
            assert_eq!(bs.data().len(), 19);
            assert_eq!(bs.data()[17..], [0b11101100]);
        }
    }
}
