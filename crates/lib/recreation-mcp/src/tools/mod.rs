//! MCP tool modules.
//!
//! Tools are grouped by dataset; each module contributes one router that is
//! mounted on `RecreationMcp`.

pub mod creative_goods;
