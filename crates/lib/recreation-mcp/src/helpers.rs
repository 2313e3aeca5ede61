use std::borrow::Cow;

use recreation_core::control::NormalizeError;
use rmcp::ErrorData;
use rmcp::model::ErrorCode;

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

pub fn map_normalize_err(err: NormalizeError) -> ErrorData {
    mcp_err(
        ErrorCode::INTERNAL_ERROR,
        format!("creative goods trade dataset is malformed: {err}"),
    )
}
