pub mod buffer;
pub mod resize;
