//! CLI command implementations.

pub mod index;
pub mod proxy;
pub mod query;
pub mod rag;
