//! Pressdash - dashboard client for the content publishing pipeline
//!
//! Polls the backend's status and activity endpoints, renders them to a
//! pluggable surface, and submits operator-triggered row-processing jobs.

pub mod api;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod io;
pub mod poller;
pub mod render;
pub mod surface;
pub mod term;

pub use config::{load_config, Config};
pub use controller::DashboardController;
pub use error::{DashboardError, Result};
