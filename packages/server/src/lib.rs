//! Knowledge verification agent.
//!
//! Ingests a piece of text, sends it to Gemini to obtain a summary, extracted
//! claims, a reliability score, and a bias classification, and exposes the
//! result behind the MIP-003 agent HTTP contract (`/availability`,
//! `/input_schema`, `/start_job`, `/status`).

pub mod common;
pub mod config;
pub mod kernel;
pub mod server;
pub mod verification;

pub use config::Config;
