pub mod config;
pub mod logger;

pub use self::config::{credentials_from_env, Config};
pub use self::logger::{init_from_config, init_logger};
