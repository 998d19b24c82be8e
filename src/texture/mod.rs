pub mod fill;
pub mod preview;
