//! MCP server implementation for hk-recreation-mcp.
//!
//! This crate wires the recreation control plane into rmcp tool handlers and
//! exposes the stdio and streamable HTTP transports.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use recreation_core::control::RecreationControlPlane;
use recreation_core::fetch::TableFetcher;
use rmcp::{ServerHandler, handler::server::tool::ToolRouter, tool_handler};
use rmcp::model::{ServerCapabilities, ServerInfo};

pub use tools::creative_goods::CreativeGoodsTradeParams;

const SERVER_INSTRUCTIONS: &str = r#"hk-recreation-mcp serves Hong Kong recreation and creative
industry open data.

Tools:
- `get_creative_goods_trade`: domestic exports, re-exports and imports of creative goods in
  Hong Kong, from the Create Hong Kong `SCG_TradeTOT.csv` dataset.
  Optional `start_year` and `end_year` restrict the inclusive year range; omit both for every
  year.

Notes:
- Each record carries `year`, `category_code`, `category`, `trade_type_code`, `trade_type`,
  `value` and `percentage`.
- `value` and `percentage` are null where the dataset marks the figure as not applicable or
  not available.
- If the dataset cannot be downloaded the tool returns `{ "type": "Error", "error": <message> }`
  instead of a record list."#;

/// MCP server wrapper around the recreation control plane.
pub struct RecreationMcp<F: TableFetcher> {
    tool_router: ToolRouter<Self>,
    control: Arc<RecreationControlPlane<F>>,
}

impl<F: TableFetcher> Clone for RecreationMcp<F> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            control: self.control.clone(),
        }
    }
}

impl<F: TableFetcher> RecreationMcp<F> {
    /// Creates a new server owning the control plane.
    #[must_use]
    pub fn new(control: RecreationControlPlane<F>) -> Self {
        Self::with_control(Arc::new(control))
    }

    /// Creates a new server using a shared control plane handle.
    #[must_use]
    pub fn with_control(control: Arc<RecreationControlPlane<F>>) -> Self {
        Self {
            tool_router: Self::tool_router_trade(),
            control,
        }
    }
}

#[tool_handler]
impl<F: TableFetcher> ServerHandler for RecreationMcp<F> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recreation_core::fetch::FetchError;
    use recreation_core::models::RawRow;

    struct NoopFetcher;

    impl TableFetcher for NoopFetcher {
        async fn fetch_table(
            &self,
            _url: &str,
            _encoding: &str,
        ) -> Result<Vec<RawRow>, FetchError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn server_info_describes_tool_and_error_shape() {
        let server = RecreationMcp::new(RecreationControlPlane::new(NoopFetcher));

        let info = server.get_info();
        let instructions = info.instructions.expect("instructions should be set");

        assert!(instructions.contains("`get_creative_goods_trade`"));
        assert!(instructions.contains(r#"{ "type": "Error", "error": <message> }"#));
        assert!(info.capabilities.tools.is_some());
    }
}
