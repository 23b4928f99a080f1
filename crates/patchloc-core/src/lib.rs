pub mod error;
pub mod consts;
pub mod frame;
pub mod io;
pub mod normalize;
pub mod filters;
pub mod template;
pub mod matching;
pub mod distort;
pub mod bench;
