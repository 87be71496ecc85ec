//! CLI domain: parse, route and output. Each command runs one scoped demonstration.

mod output;
mod parse;
mod route;

pub use output::{format_settings, map_error};
pub use parse::{Cli, Commands};
pub use route::{parse_setting, RunContext};
