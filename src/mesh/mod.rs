pub mod cube;
pub mod target;
