pub mod file;
pub mod paths;
pub mod types;

pub use file::load_config;
pub use types::{FileConfig, HostConfig, KeysConfig, Verbosity};
