use recreation_core::fetch::TableFetcher;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::{RecreationMcp, helpers};

/// Parameters for the creative goods trade query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct CreativeGoodsTradeParams {
    /// Start year of range
    pub start_year: Option<i32>,
    /// End year of range
    pub end_year: Option<i32>,
}

#[tool_router(router = tool_router_trade, vis = "pub")]
impl<F: TableFetcher> RecreationMcp<F> {
    #[tool(description = "Domestic Exports, Re-exports and Imports of Creative Goods in Hong Kong")]
    async fn get_creative_goods_trade(
        &self,
        Parameters(params): Parameters<CreativeGoodsTradeParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let outcome = self
            .control
            .get_creative_goods_trade(params.start_year, params.end_year)
            .await
            .map_err(helpers::map_normalize_err)?;
        Ok(CallToolResult::success(vec![Content::json(outcome)?]))
    }
}

#[cfg(test)]
mod tests {
    use recreation_core::control::RecreationControlPlane;
    use recreation_core::fetch::{FetchError, FetchErrorKind, parse_table};
    use recreation_core::models::RawRow;
    use serde_json::{Value, json};

    use super::*;

    const CSV_DATA: &str = "Year,CI_Goods_Cat,Trade_Type,Values,Percentage,Last Update
2020,1,1,1000,10.0%,31/03/2021
2021,1,3,1500,15.0%,31/03/2022
2021,8,2,999999999,999.9%,31/03/2022";

    struct CannedFetcher(Result<Vec<RawRow>, FetchError>);

    impl TableFetcher for CannedFetcher {
        async fn fetch_table(
            &self,
            _url: &str,
            _encoding: &str,
        ) -> Result<Vec<RawRow>, FetchError> {
            self.0.clone()
        }
    }

    fn server(result: Result<Vec<RawRow>, FetchError>) -> RecreationMcp<CannedFetcher> {
        RecreationMcp::new(RecreationControlPlane::new(CannedFetcher(result)))
    }

    fn csv_server() -> RecreationMcp<CannedFetcher> {
        server(Ok(parse_table(CSV_DATA).expect("fixture csv should parse")))
    }

    fn payload(result: &CallToolResult) -> Value {
        let value = serde_json::to_value(result).expect("serialize tool result");
        assert_ne!(value["isError"], json!(true), "tool reported an error: {value}");
        let text = value["content"][0]["text"]
            .as_str()
            .expect("tool result should carry text content");
        serde_json::from_str(text).expect("tool content should be JSON")
    }

    #[test]
    fn registers_single_trade_tool() {
        let tools = RecreationMcp::<CannedFetcher>::tool_router_trade().list_all();
        assert_eq!(tools.len(), 1);

        let tool = serde_json::to_value(&tools[0]).expect("serialize tool");
        assert_eq!(tool["name"], json!("get_creative_goods_trade"));
        assert_eq!(
            tool["description"],
            json!("Domestic Exports, Re-exports and Imports of Creative Goods in Hong Kong")
        );
        let properties = tool["inputSchema"]["properties"]
            .as_object()
            .expect("input schema should list properties");
        assert!(properties.contains_key("start_year"));
        assert!(properties.contains_key("end_year"));
        let required = tool["inputSchema"]["required"]
            .as_array()
            .map_or(0, Vec::len);
        assert_eq!(required, 0);
    }

    #[tokio::test]
    async fn returns_all_records_without_bounds() {
        let result = csv_server()
            .get_creative_goods_trade(Parameters(CreativeGoodsTradeParams::default()))
            .await
            .expect("tool should succeed");

        let records = payload(&result);
        assert_eq!(records.as_array().map(Vec::len), Some(3));
        assert_eq!(
            records[2],
            json!({
                "year": 2021,
                "category_code": 8,
                "category": "Overall Creative Goods",
                "trade_type_code": 2,
                "trade_type": "Re-exports",
                "value": null,
                "percentage": null
            })
        );
    }

    #[tokio::test]
    async fn filters_by_year_range() {
        let params = CreativeGoodsTradeParams {
            start_year: Some(2020),
            end_year: Some(2020),
        };
        let result = csv_server()
            .get_creative_goods_trade(Parameters(params))
            .await
            .expect("tool should succeed");

        assert_eq!(
            payload(&result),
            json!([{
                "year": 2020,
                "category_code": 1,
                "category": "Advertising",
                "trade_type_code": 1,
                "trade_type": "Domestic Exports",
                "value": 1000,
                "percentage": 10.0
            }])
        );
    }

    #[tokio::test]
    async fn fetch_failure_is_returned_as_error_object() {
        let failing = server(Err(FetchError::new(FetchErrorKind::Request, "CSV fetch failed")));
        let params = CreativeGoodsTradeParams {
            start_year: Some(2020),
            end_year: None,
        };
        let result = failing
            .get_creative_goods_trade(Parameters(params))
            .await
            .expect("fetch failure is still a tool result");

        assert_eq!(
            payload(&result),
            json!({ "type": "Error", "error": "CSV fetch failed" })
        );
    }

    #[tokio::test]
    async fn malformed_dataset_is_an_internal_error() {
        let rows = vec![RawRow::from_iter([
            ("Year", "2020"),
            ("CI_Goods_Cat", "one"),
            ("Trade_Type", "1"),
            ("Values", "1"),
            ("Percentage", "1.0%"),
        ])];
        let err = server(Ok(rows))
            .get_creative_goods_trade(Parameters(CreativeGoodsTradeParams::default()))
            .await
            .expect_err("malformed dataset should fail");

        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("CI_Goods_Cat"));
    }

    #[test]
    fn params_default_when_arguments_are_empty() {
        let params: CreativeGoodsTradeParams =
            serde_json::from_value(json!({})).expect("empty arguments should parse");
        assert_eq!(params.start_year, None);
        assert_eq!(params.end_year, None);
    }
}
