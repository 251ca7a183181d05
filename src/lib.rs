//! Resume Genie: a terminal client for an AI resume enhancement service.
//!
//! The flow is a four step wizard: upload a resume, let the backend
//! polish it into structured data, optionally score it against a job
//! description, then download the result as a PDF. All AI work happens
//! on the backend; this crate is the front end and keeps nothing on
//! disk beyond the PDFs the user saves.

pub mod about;
pub mod cli;
pub mod config;
pub mod core;
pub mod diff;
pub mod error;
pub mod tui;
pub mod types;
pub mod utils;

pub use crate::core::{ApiClient, Session};
