use std::ops::Deref;

use crate::common::bch::{format_info, FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN};
use crate::common::bit_utils::BitStream;
use crate::common::iter::EncRegionIter;
use crate::common::mask::MaskPattern;
use crate::common::metadata::{Color, ECLevel, Version};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

/// Test passes hide format & version info so mask trials are scored on the
/// same metadata. Final passes write the real values.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Pass {
    Test,
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w, ver, ecl, mask: None }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn metadata(&self) -> String {
        super::metadata_str(Some(self.ver), self.ecl, self.mask)
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    /// True once every module has been drawn.
    pub fn is_complete(&self) -> bool {
        !self.grid.contains(&Module::Empty)
    }

    /// Rows of modules, dark as `true`.
    pub fn to_bools(&self) -> Vec<Vec<bool>> {
        self.grid
            .chunks_exact(self.w)
            .map(|row| row.iter().map(|m| **m == Color::Dark).collect())
            .collect()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        assert!(-w <= r && r < w, "Row {r} out of bounds for width {w}");
        assert!(-w <= c && c < w, "Column {c} out of bounds for width {w}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r as usize) * self.w + c as usize
    }

    /// Module at row `r` & column `c`. Negative indices count from the far
    /// edge.
    ///
    /// # Panics
    ///
    /// Panics unless both indices lie in `-width..width`.
    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }

    fn is_set(&self, r: i16, c: i16) -> bool {
        !matches!(self.get(r, c), Module::Empty)
    }
}

#[cfg(test)]
mod qr_util_tests {
    use crate::builder::{Module, QR};
    use crate::common::metadata::{Color, ECLevel, Version};

    fn v1() -> QR {
        QR::new(Version::new(1).unwrap(), ECLevel::L)
    }

    #[test]
    fn test_index_wrap() {
        let mut qr = v1();
        let w = qr.w as i16;
        qr.set(-1, -1, Module::Func(Color::Dark));
        assert_eq!(qr.get(w - 1, w - 1), Module::Func(Color::Dark));
        qr.set(0, 0, Module::Func(Color::Dark));
        assert_eq!(qr.get(-w, -w), Module::Func(Color::Dark));
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_bound() {
        let qr = v1();
        let w = qr.w as i16;
        qr.get(w, 0);
    }

    #[test]
    #[should_panic(expected = "Column 21 out of bounds for width 21")]
    fn test_col_past_edge_does_not_wrap_to_next_row() {
        let mut qr = v1();
        qr.set(1, 0, Module::Func(Color::Dark));
        qr.get(0, 21);
    }

    #[test]
    #[should_panic]
    fn test_col_out_of_bound() {
        let qr = v1();
        let w = qr.w as i16;
        qr.get(0, w);
    }

    #[test]
    #[should_panic]
    fn test_row_index_overwrap() {
        let qr = v1();
        let w = qr.w as i16;
        qr.get(-(w + 1), 0);
    }

    #[test]
    fn test_new_is_empty() {
        let qr = v1();
        assert_eq!(qr.grid().len(), 441);
        assert!(!qr.is_complete());
        assert_eq!(qr.count_dark_modules(), 0);
        assert_eq!(qr.mask(), None);
        assert_eq!(qr.metadata(), "{ Version: 1, Ec level: L, Mask: None }");
    }

    #[test]
    fn test_to_bools() {
        let mut qr = v1();
        qr.set(0, 1, Module::Data(Color::Dark));
        qr.set(-1, 0, Module::Func(Color::Dark));
        let bools = qr.to_bools();
        assert_eq!(bools.len(), 21);
        assert!(bools.iter().all(|row| row.len() == 21));
        assert!(bools[0][1] && bools[20][0]);
        assert_eq!(bools.iter().flatten().filter(|&&b| b).count(), 2);
    }
}

// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // Draws the 7x7 pattern centred at (r, c) with its separator on the sides
    // facing the symbol interior
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom): (i16, i16) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right): (i16, i16) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                let clr = match i.abs().max(j.abs()) {
                    4 | 2 => Color::Light,
                    _ => Color::Dark,
                };
                self.set(r + i, c + j, Module::Func(clr));
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                if !self.is_set(r, c) {
                    self.draw_alignment_pattern_at(r, c)
                }
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        for i in -2..=2 {
            for j in -2..=2 {
                let clr = match (i, j) {
                    (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Color::Dark,
                    _ => Color::Light,
                };
                self.set(r + i, c + j, Module::Func(clr))
            }
        }
    }
}

#[cfg(test)]
mod alignment_pattern_tests {
    use crate::builder::{Module, QR};
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_alignment_pattern_1() {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::L);
        qr.draw_alignment_patterns();
        assert_eq!(qr.count_dark_modules(), 0);
        assert!(!qr.grid().iter().any(|m| matches!(m, Module::Func(_))));
    }

    #[test]
    fn test_alignment_pattern_3() {
        let mut qr = QR::new(Version::new(3).unwrap(), ECLevel::L);
        qr.draw_finder_patterns();
        qr.draw_alignment_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.............Ffffffff\n\
             fFFFFFfF.............FfFFFFFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFFFFFfF.............FfFFFFFf\n\
             fffffffF.............Ffffffff\n\
             FFFFFFFF.............FFFFFFFF\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             ....................fffff....\n\
             FFFFFFFF............fFFFf....\n\
             fffffffF............fFfFf....\n\
             fFFFFFfF............fFFFf....\n\
             fFfffFfF............fffff....\n\
             fFfffFfF.....................\n\
             fFfffFfF.....................\n\
             fFFFFFfF.....................\n\
             fffffffF.....................\n"
        );
    }

    #[test]
    fn test_alignment_pattern_7() {
        let mut qr = QR::new(Version::new(7).unwrap(), ECLevel::L);
        qr.draw_finder_patterns();
        qr.draw_alignment_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffF.............................Ffffffff\n\
             fFFFFFfF.............................FfFFFFFf\n\
             fFfffFfF.............................FfFfffFf\n\
             fFfffFfF.............................FfFfffFf\n\
             fFfffFfF............fffff............FfFfffFf\n\
             fFFFFFfF............fFFFf............FfFFFFFf\n\
             fffffffF............fFfFf............Ffffffff\n\
             FFFFFFFF............fFFFf............FFFFFFFF\n\
             ....................fffff....................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             ....................fffff...........fffff....\n\
             FFFFFFFF............fFFFf...........fFFFf....\n\
             fffffffF............fFfFf...........fFfFf....\n\
             fFFFFFfF............fFFFf...........fFFFf....\n\
             fFfffFfF............fffff...........fffff....\n\
             fFfffFfF.....................................\n\
             fFfffFfF.....................................\n\
             fFFFFFfF.....................................\n\
             fffffffF.....................................\n"
        );
    }
}

// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        for i in 8..w - 8 {
            let clr = Color::from(i & 1 == 0);
            if !self.is_set(i, 6) {
                self.set(i, 6, Module::Func(clr));
            }
            if !self.is_set(6, i) {
                self.set(6, i, Module::Func(clr));
            }
        }
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    fn draw_format_info(&mut self, mask: MaskPattern, pass: Pass) {
        let info = match pass {
            Pass::Test => 0,
            Pass::Final => format_info(self.ecl, mask),
        };
        self.draw_number(info, FORMAT_INFO_BIT_LEN, Module::Format, &FORMAT_INFO_COORDS_VERT);
        self.draw_number(info, FORMAT_INFO_BIT_LEN, Module::Format, &FORMAT_INFO_COORDS_HOR);
        self.set(-8, 8, Module::Format(Color::from(pass == Pass::Final)));
    }

    fn draw_version_info(&mut self, pass: Pass) {
        if *self.ver < 7 {
            return;
        }
        let info = match pass {
            Pass::Test => 0,
            Pass::Final => self.ver.info(),
        };
        let tr = (0..VERSION_INFO_BIT_LEN as i16).map(|i| (i / 3, i % 3 - 11)).collect::<Vec<_>>();
        let bl = tr.iter().map(|&(r, c)| (c, r)).collect::<Vec<_>>();
        self.draw_number(info, VERSION_INFO_BIT_LEN, Module::Version, &tr);
        self.draw_number(info, VERSION_INFO_BIT_LEN, Module::Version, &bl);
    }

    // Bit i of `number` goes to coords[i], least significant bit first
    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        module: fn(Color) -> Module,
        coords: &[(i16, i16)],
    ) {
        debug_assert!(coords.len() == bit_len, "Coordinate count doesn't match bit length");
        for (i, &(r, c)) in coords.iter().enumerate() {
            self.set(r, c, module(Color::from((number >> i) & 1 == 1)));
        }
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    /// Redraws the whole symbol from scratch for the given payload & mask.
    pub fn draw_all(&mut self, payload: &BitStream, mask: MaskPattern, pass: Pass) {
        self.grid.fill(Module::Empty);
        self.draw_finder_patterns();
        self.draw_alignment_patterns();
        self.draw_timing_pattern();
        self.draw_format_info(mask, pass);
        self.draw_version_info(pass);
        self.draw_payload(payload, mask);
        self.mask = Some(mask);

        debug_assert!(self.is_complete(), "Empty module found after drawing");
    }

    // Bits past the end of the payload are drawn as light before masking
    fn draw_payload(&mut self, payload: &BitStream, mask: MaskPattern) {
        let mask_fn = mask.mask_functions();
        let mut bits = payload.iter();
        for (r, c) in EncRegionIter::new(self.ver) {
            if self.is_set(r, c) {
                continue;
            }
            let bit = bits.next().unwrap_or(false);
            let dark = bit ^ mask_fn(r as i32, c as i32);
            self.set(r, c, Module::Data(Color::from(dark)));
        }
    }
}


// Global constants
//------------------------------------------------------------------------------

static FORMAT_INFO_COORDS_VERT: [(i16, i16); 15] = [
    (0, 8),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (7, 8),
    (8, 8),
    (-7, 8),
    (-6, 8),
    (-5, 8),
    (-4, 8),
    (-3, 8),
    (-2, 8),
    (-1, 8),
];

static FORMAT_INFO_COORDS_HOR: [(i16, i16); 15] = [
    (8, -1),
    (8, -2),
    (8, -3),
    (8, -4),
    (8, -5),
    (8, -6),
    (8, -7),
    (8, -8),
    (8, 7),
    (8, 5),
    (8, 4),
    (8, 3),
    (8, 2),
    (8, 1),
    (8, 0),
];
