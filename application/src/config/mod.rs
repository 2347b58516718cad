//! Application-level configuration.
//!
//! - [`ChatBehavior`]: protocol variant and submission/source policies

pub mod chat_behavior;

pub use chat_behavior::ChatBehavior;
