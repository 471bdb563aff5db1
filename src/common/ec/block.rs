// Reed-Solomon block descriptor
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Block {
    // Block length
    pub len: usize,
    // Data length
    pub dlen: usize,
}

impl Block {
    pub const fn new(len: usize, dlen: usize) -> Self {
        Self { len, dlen }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn data_len(&self) -> usize {
        self.dlen
    }

    pub fn ec_len(&self) -> usize {
        self.len - self.dlen
    }
}
