#![warn(clippy::pedantic)]

pub mod bits;
pub mod error;
pub mod header;
pub mod movie;
pub mod rect;

pub use bits::BitReader;
pub use error::WireError;
pub use header::{Compression, HEADER_SIZE, Header, Signature};
pub use movie::{FRAME_INFO_SIZE, FrameInfo, FrameRate};
pub use rect::Rect;
