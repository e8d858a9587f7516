pub mod config;
pub mod error;
pub mod probe;

pub use config::ProbeConfig;
pub use error::ProbeError;
