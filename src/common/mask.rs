use std::ops::Deref;

use log::trace;

use super::bit_utils::BitStream;
use super::error::{QRError, QRResult};
use super::metadata::{Color, ECLevel, Version};
use crate::builder::{Pass, QR};

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        match pattern {
            0..=7 => Ok(Self(pattern)),
            _ => Err(QRError::InvalidMaskPattern(pattern)),
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).map(Self)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i32, c: i32) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i32, _: i32) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i32, c: i32) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i32, c: i32) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i32, c: i32) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i32, c: i32) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i32, c: i32) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i32, c: i32) -> bool {
        (((r * c) % 3) + ((r + c) & 1)) & 1 == 0
    }
}

impl MaskPattern {
    /// Predicate over `(row, col)`; data bits where it holds are flipped.
    pub fn mask_functions(self) -> fn(i32, i32) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}


// Penalty
//------------------------------------------------------------------------------

/// Penalty of a drawn symbol split by heuristic. Lower is better.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Penalty {
    pub adjacency: u32,
    pub block: u32,
    pub finder: u32,
    pub balance: f64,
}

impl Penalty {
    pub fn total(&self) -> f64 {
        (self.adjacency + self.block + self.finder) as f64 + self.balance
    }
}

pub fn compute_penalty(qr: &QR) -> Penalty {
    let dark = |r: i16, c: i16| *qr.get(r, c) == Color::Dark;
    let w = qr.width() as i16;
    Penalty {
        adjacency: compute_adjacent_penalty(w, &dark),
        block: compute_block_penalty(w, &dark),
        finder: compute_finder_pattern_penalty(w, &dark, true)
            + compute_finder_pattern_penalty(w, &dark, false),
        balance: compute_balance_penalty(qr),
    }
}

fn compute_adjacent_penalty(w: i16, dark: &impl Fn(i16, i16) -> bool) -> u32 {
    let mut pen = 0;
    for r in 0..w {
        for c in 0..w {
            let clr = dark(r, c);
            let mut same = 0;
            for i in (r - 1).max(0)..=(r + 1).min(w - 1) {
                for j in (c - 1).max(0)..=(c + 1).min(w - 1) {
                    if (i, j) != (r, c) && dark(i, j) == clr {
                        same += 1;
                    }
                }
            }
            if same > 5 {
                pen += 3 + same - 5;
            }
        }
    }
    pen
}

fn compute_block_penalty(w: i16, dark: &impl Fn(i16, i16) -> bool) -> u32 {
    let mut pen = 0;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = dark(r, c);
            if clr == dark(r + 1, c) && clr == dark(r, c + 1) && clr == dark(r + 1, c + 1) {
                pen += 3;
            }
        }
    }
    pen
}

fn compute_finder_pattern_penalty(w: i16, dark: &impl Fn(i16, i16) -> bool, is_hor: bool) -> u32 {
    static PATTERN: [bool; 7] = [true, false, true, true, true, false, true];
    let mut pen = 0;
    for i in 0..w {
        for j in 0..w - 6 {
            let get = |k: i16| if is_hor { dark(i, k) } else { dark(k, i) };
            if (j..j + 7).map(get).eq(PATTERN.iter().copied()) {
                pen += 40;
            }
        }
    }
    pen
}

fn compute_balance_penalty(qr: &QR) -> f64 {
    let dark_cnt = qr.count_dark_modules() as f64;
    let w = qr.width() as f64;
    let ratio = ((100.0 * dark_cnt) / w / w - 50.0).abs() / 5.0;
    ratio * 10.0
}

// Mask selection
//------------------------------------------------------------------------------

/// Draws a test pass for every mask and returns the lowest scoring one. Ties
/// go to the lower index.
pub fn find_best_mask(ver: Version, ecl: ECLevel, payload: &BitStream) -> MaskPattern {
    let mut best = MaskPattern(0);
    let mut min_pen = f64::INFINITY;
    let mut qr = QR::new(ver, ecl);
    for mask in MaskPattern::all() {
        qr.draw_all(payload, mask, Pass::Test);
        let pen = compute_penalty(&qr);
        trace!("Mask {}: {pen:?}, total {}", *mask, pen.total());
        if pen.total() < min_pen {
            min_pen = pen.total();
            best = mask;
        }
    }
    best
}

#[cfg(test)]
mod penalty_tests {
    use super::{compute_penalty, find_best_mask, MaskPattern, Penalty};
    use crate::builder::{Pass, QR};
    use crate::common::bit_utils::BitStream;
    use crate::common::metadata::{ECLevel, Version};

    // Codewords for "HELLO" at version 1, level M
    const HELLO: [u8; 26] = [
        64, 84, 132, 84, 196, 196, 240, 236, 17, 236, 17, 236, 17, 236, 17, 236, 35, 115, 35,
        153, 236, 8, 201, 247, 55, 223,
    ];

    fn hello_test_pass(mask: u8) -> QR {
        let ver = Version::new(1).unwrap();
        let mut qr = QR::new(ver, ECLevel::M);
        qr.draw_all(&BitStream::from(&HELLO), MaskPattern::new(mask).unwrap(), Pass::Test);
        qr
    }

    #[test]
    fn test_penalty_components() {
        let exp = [
            (234, 189, 800, 207),
            (303, 237, 880, 221),
            (164, 153, 760, 213),
            (239, 186, 760, 203),
            (228, 201, 720, 209),
            (304, 213, 800, 219),
            (312, 228, 800, 215),
            (255, 192, 840, 203),
        ];
        for (m, (adj, blk, fin, dark)) in exp.into_iter().enumerate() {
            let qr = hello_test_pass(m as u8);
            let pen = compute_penalty(&qr);
            assert_eq!(qr.count_dark_modules(), dark, "mask {m}");
            assert_eq!((pen.adjacency, pen.block, pen.finder), (adj, blk, fin), "mask {m}");
        }
    }

    #[test]
    fn test_penalty_totals() {
        let exp = [
            1229.1224489795918,
            1420.2267573696145,
            1080.4013605442176,
            1192.936507936508,
            1154.2154195011337,
            1317.6802721088436,
            1342.4943310657595,
            1294.936507936508,
        ];
        for (m, exp) in exp.into_iter().enumerate() {
            let total = compute_penalty(&hello_test_pass(m as u8)).total();
            assert!((total - exp).abs() < 1e-9, "mask {m}: {total} != {exp}");
        }
    }

    #[test]
    fn test_find_best_mask() {
        let ver = Version::new(1).unwrap();
        let payload = BitStream::from(&HELLO);
        let best = find_best_mask(ver, ECLevel::M, &payload);
        assert_eq!(*best, 2);
        assert_eq!(find_best_mask(ver, ECLevel::M, &payload), best);
    }

    #[test]
    fn test_total() {
        let pen = Penalty { adjacency: 10, block: 6, finder: 40, balance: 2.5 };
        assert_eq!(pen.total(), 58.5);
        assert_eq!(Penalty::default().total(), 0.0);
    }
}
