//! Outbound side: one authenticated GET per tool call against the Lexware
//! Office REST API.

mod client;
mod error;

pub use client::LexofficeClient;
pub use error::LexofficeError;
