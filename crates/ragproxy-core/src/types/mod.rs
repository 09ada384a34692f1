//! Request and response payloads shared by the retrieval service and the proxy.

mod document;
mod message;

pub use document::*;
pub use message::*;
