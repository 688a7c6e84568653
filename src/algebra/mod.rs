mod api;
mod branch;
mod dependencies;
mod zabbix;

pub use api::*;
pub use branch::*;
pub use dependencies::*;
pub use zabbix::*;
