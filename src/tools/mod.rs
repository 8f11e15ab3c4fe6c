//! MCP tool inputs for Umami.
//!
//! This module contains the input types for the MCP tools that expose
//! Umami operations. The tools themselves are routed in
//! [`server`](crate::server).

mod inputs;

pub use inputs::*;
