mod config;
pub use self::config::Config;

pub mod actions;
pub mod commands;
pub mod dispatch;
pub mod executor;
pub use self::executor::{Executor, report_error};

pub mod globals;
pub mod progressbar;

mod start;
pub use self::start::{get_config_path, resolve, start};
