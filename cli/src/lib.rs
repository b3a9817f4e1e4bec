//! Native command-line client for the KrishiDrishti backend.

pub mod args;
pub mod commands;
pub mod output;
pub mod sniff;
pub mod transport;

pub use transport::{LocalFile, ReqwestTransport};
