//! UFO convert CLI library.

pub mod cli;
