//! Configuration types
//!
//! Board-agnostic configuration with reference defaults, plus a parser for
//! the TOML subset the firmware embeds.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
