//! Diffsense Providers - Generation backend access
//!
//! The analyzers speak to a text-generation backend through the
//! [`TextGenerator`] trait; the production implementation is
//! [`OllamaClient`], which runs models locally so code never leaves the
//! machine. Retry and timeout policy live here and nowhere else. Scripted
//! test doubles let everything upstream run without a backend.

pub mod config;
pub mod error;
pub mod generator;
pub mod ollama;
pub mod testing;

pub use config::GenerationConfig;
pub use error::ProviderError;
pub use generator::TextGenerator;
pub use ollama::OllamaClient;
pub use testing::{FailingGenerator, ScriptedGenerator, StallingGenerator};
