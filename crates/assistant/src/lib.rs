//! Canned market assistant
//!
//! Replies come from a fixed table of keyword rules; there is no language
//! model behind it.

pub mod error;
pub mod normalize;
pub mod responder;
pub mod conversation;

pub use conversation::{Conversation, Message, Role};
pub use error::{Error, Result};
pub use normalize::MessageNormalizer;
pub use responder::{KeywordResponder, Rule};
