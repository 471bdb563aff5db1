mod block;
mod galois;
mod poly;

pub use block::*;
pub use galois::gexp;
pub use poly::*;
