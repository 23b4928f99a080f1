pub mod bench;
pub mod config;
pub mod distort;
pub mod locate;
