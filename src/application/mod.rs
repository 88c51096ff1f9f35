//! Application layer - Use cases and port interfaces
//!
//! Contains the request handler and the trait definitions
//! for external system interactions.

pub mod error;
pub mod handler;
pub mod ports;
pub mod resolve;

pub use error::{ErrorKind, HandlerError};
pub use handler::{Stage, TranscribeHandler};
pub use resolve::InputResolver;
