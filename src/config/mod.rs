// Archive configuration
//
// Resolves the data and index file locations from the environment and
// JSON configuration files.

pub mod oed_config;

pub use oed_config::OedConfig;
