mod branch;
mod dependency;
mod error;
mod host;
mod id;
mod outcome;
mod report;
mod rpc;
mod trigger;

pub use branch::*;
pub use dependency::*;
pub use error::*;
pub use host::*;
pub use id::*;
pub use outcome::*;
pub use report::*;
pub use rpc::*;
pub use trigger::*;

pub type Unit = ();
