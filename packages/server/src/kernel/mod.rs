//! Infrastructure: dependency traits, provider implementations, job storage.

pub mod ai;
pub mod jobs;
pub mod test_dependencies;
pub mod traits;

pub use ai::GeminiAI;
pub use test_dependencies::MockAI;
pub use traits::BaseAI;
