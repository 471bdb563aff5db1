use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Walks column pairs right to left in a zigzag, starting upwards from the
/// bottom right corner. The vertical timing column is skipped. Yields every
/// visited coordinate, including function modules; callers skip what is set.
pub struct EncRegionIter {
    r: i16,
    c: i16,
    // 0 for the right column of the pair, 1 for the left
    offset: i16,
    // -1 moving up, 1 moving down
    dir: i16,
    width: i16,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, offset: 0, dir: -1, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c <= 0 {
            return None;
        }
        let res = (self.r, self.c - self.offset);

        if self.offset == 0 {
            self.offset = 1;
            return Some(res);
        }

        self.offset = 0;
        let r = self.r + self.dir;
        if (0..self.width).contains(&r) {
            self.r = r;
        } else {
            self.dir = -self.dir;
            self.c -= 2;
            if self.c == 6 {
                self.c = 5;
            }
        }
        Some(res)
    }
}
