//! CLI command implementations.

mod cache;
mod config;
mod doctor;
mod listen;
mod present;

pub use cache::run_cache;
pub use config::run_config;
pub use doctor::run_doctor;
pub use listen::run_listen;
pub use present::run_present;
