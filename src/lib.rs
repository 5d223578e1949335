//! Library crate for the challenge overlay server, exposing modules for binaries and integration tests.

pub mod config;
pub mod dto;
mod error;
pub mod routes;
pub mod services;
pub mod state;

pub use error::{AppError, ServiceError};
