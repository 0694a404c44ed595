//! Service layer
//!
//! Adapters between the out command and the CI server client. The command
//! depends only on these traits, so each step can be swapped in tests.

mod deleter;
mod setter;
mod unpauser;

// Re-export traits
pub use deleter::PipelineDeleter;
pub use setter::PipelineSetter;
pub use unpauser::PipelineUnpauser;

// Re-export implementations
pub use deleter::StandardPipelineDeleter;
pub use setter::ConfigPipelineSetter;
pub use unpauser::StandardPipelineUnpauser;
