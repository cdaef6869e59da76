pub mod http;
pub mod mcp;
pub mod serde_utils;
pub mod todoist;
