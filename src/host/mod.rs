pub mod controller;
pub mod hooks;
