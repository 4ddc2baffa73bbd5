//! An abstraction layer for LLM aggregation services.
//!
//! This crate establishes an unified protocol for talking to remote
//! chat-completion and embedding endpoints, so that callers can switch
//! between providers without touching their own code.
//!
//! Types in this crate don't define any network behavior, instead they
//! are the constraints that the implementors should adhere to. A
//! provider takes a [`GenerateRequest`] or an [`EmbedRequest`] and hands
//! back a normalized [`Response`] or a list of embeddings.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
