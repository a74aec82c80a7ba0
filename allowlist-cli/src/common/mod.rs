pub mod cli;
pub mod input;
pub mod utils;
