#[macro_use]
extern crate log;
#[macro_use]
extern crate clap;

pub mod analyzer;
pub mod args;
pub mod cohort;
pub mod driver;
pub mod error;
pub mod evaluation;
pub mod input;
pub mod log_parser;
pub mod render;
pub mod request_matcher;
pub mod result;
