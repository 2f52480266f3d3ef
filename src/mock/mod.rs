//! Facilities for running a lightweight mock HTTP server that mimics the
//! chat-completions endpoint. Useful for integration-style tests or the
//! demo binary, which exercise the gateway without contacting the real
//! service.

mod server;

pub use server::*;
