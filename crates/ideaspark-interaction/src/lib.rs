//! Remote generation for IdeaSpark.
//!
//! `GeminiGateway` implements the core `GenerationGateway` trait on top of
//! the Gemini REST API; `prompts` renders the text sent with each call.

pub mod gemini_gateway;
pub mod prompts;

pub use gemini_gateway::GeminiGateway;
pub use prompts::PromptLibrary;
