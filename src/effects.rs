pub mod crown;
pub mod driver;
pub mod fireworks;
pub mod sticker;
pub mod transition;
