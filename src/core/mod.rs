// src/core/mod.rs
//! Core services: backend client, wizard session, downloads, pipeline.

pub mod downloads;
pub mod pipeline;
pub mod service_client;
pub mod session;

pub use service_client::ApiClient;
pub use session::{Session, Step, WizardState};
