pub use self::{bits::*, block_map::*, board::*, piece::*};

pub(crate) mod bits;
pub(crate) mod block_map;
pub(crate) mod board;
pub(crate) mod piece;
