pub mod config;
pub mod error;
pub mod media;

pub use config::AppConfig;
pub use error::{Error, Result};
