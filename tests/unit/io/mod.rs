pub mod configuration;
pub mod input;
pub mod logging;
