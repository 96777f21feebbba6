//! LLM backend implementations for docscout.
//!
//! All providers implement the `docscout_core::Provider` trait.
//! [`router::build_provider`] picks one from configuration and
//! [`SharedBackend`] keeps the built client for the life of the process.

pub mod anthropic;
pub mod openai_compat;
pub mod router;
pub mod shared;

pub use anthropic::AnthropicProvider;
pub use openai_compat::OpenAiCompatProvider;
pub use router::build_provider;
pub use shared::SharedBackend;
