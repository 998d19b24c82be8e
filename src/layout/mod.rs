pub mod grid;
pub mod model;
pub mod side;
pub mod state;
