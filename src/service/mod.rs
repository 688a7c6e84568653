mod cli;
mod configuration;

pub use cli::*;
pub use configuration::*;
