//! Configuration module for envault
//!
//! - Config directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::EnvaultPaths;
pub use settings::Settings;
