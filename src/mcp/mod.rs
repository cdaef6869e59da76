//! Model Context Protocol (MCP) server implementation
//!
//! This module exposes the Todoist API as MCP tools, over Streamable HTTP or
//! stdio.
//!
//! # Architecture
//!
//! - **registry**: Tool descriptors, the registration filter and `invoke`,
//!   the single pipeline every call goes through
//! - **tools**: The static catalogue, one module per Todoist resource
//! - **config**: Minimal-mode switch and essential tool names
//! - **auth**: Per-session authorization context
//! - **server**: Per-session `ServerHandler` backed by the registered tools
//! - **service**: Streamable HTTP service factory

pub mod auth;
pub mod config;
pub mod registry;
pub mod server;
mod service;
pub mod tools;

#[cfg(test)]
mod service_test;

pub use auth::AuthContext;
pub use config::{ESSENTIAL_TOOLS, ToolSetConfig};
pub use registry::{RegisteredToolTable, ToolContext, ToolDescriptor, ToolError, invoke};
pub use server::McpServer;
pub use service::create_mcp_service;
