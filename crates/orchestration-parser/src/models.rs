//! These models represent the objects passed through one orchestration step
//!
//! There are two formats we need to interact with:
//! - the model payload, a `stop_reason` plus a list of text and tool_use content blocks
//! - the parsed response envelope handed back to the agent runtime
//!
//! The content models are read from the payload once and converted into internal types.
//! The outcome models double as the wire shapes of the envelope, so field names follow
//! the runtime's camelCase contract.
pub mod answer;
pub mod content;
pub mod invocation;
pub mod outcome;
pub mod response;
