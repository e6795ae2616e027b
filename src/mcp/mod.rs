//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes extraction, synthesis and lookup to AI assistants over stdio.
//!
//! ## Module Structure
//!
//! - `server`: tool router and stdio entry point
//! - `types`: tool parameters and results

mod server;
pub mod types;

pub use server::{StrlocMcpServer, run_server};
