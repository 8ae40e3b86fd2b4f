//! Off-screen cell buffer the grid renders into.

mod buffer;
mod cell;

pub use buffer::Buffer;
pub use cell::Cell;
