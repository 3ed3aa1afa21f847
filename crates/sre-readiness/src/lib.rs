#![allow(missing_docs)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod secure;
pub mod session;

pub use config::{FileConfig, Overrides, Settings, load_schema};
pub use secure::FileSideChannel;
pub use session::Session;
