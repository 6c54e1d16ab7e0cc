pub mod config;
pub mod doctor;
pub mod log;
pub mod validate;

pub use config::*;
pub use doctor::*;
pub use log::*;
pub use validate::*;
