//! Port traits decoupling the core from its collaborators.

pub mod config_port;
pub mod export_port;
pub mod history_port;
