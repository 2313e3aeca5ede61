use std::collections::HashMap;

use serde::Serialize;

/// One source CSV line keyed by header column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }
}

/// Creative industry classification carried in the `CI_Goods_Cat` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreativeGoodsCategory {
    Advertising,
    Architecture,
    Design,
    DigitalEntertainment,
    FilmAndTelevision,
    Music,
    PrintingAndPublishing,
    OverallCreativeGoods,
}

impl CreativeGoodsCategory {
    pub const ALL: [Self; 8] = [
        Self::Advertising,
        Self::Architecture,
        Self::Design,
        Self::DigitalEntertainment,
        Self::FilmAndTelevision,
        Self::Music,
        Self::PrintingAndPublishing,
        Self::OverallCreativeGoods,
    ];

    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Advertising),
            2 => Some(Self::Architecture),
            3 => Some(Self::Design),
            4 => Some(Self::DigitalEntertainment),
            5 => Some(Self::FilmAndTelevision),
            6 => Some(Self::Music),
            7 => Some(Self::PrintingAndPublishing),
            8 => Some(Self::OverallCreativeGoods),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Advertising => 1,
            Self::Architecture => 2,
            Self::Design => 3,
            Self::DigitalEntertainment => 4,
            Self::FilmAndTelevision => 5,
            Self::Music => 6,
            Self::PrintingAndPublishing => 7,
            Self::OverallCreativeGoods => 8,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Advertising => "Advertising",
            Self::Architecture => "Architecture",
            Self::Design => "Design",
            Self::DigitalEntertainment => "Digital Entertainment",
            Self::FilmAndTelevision => "Film & Television",
            Self::Music => "Music",
            Self::PrintingAndPublishing => "Printing & Publishing",
            Self::OverallCreativeGoods => "Overall Creative Goods",
        }
    }
}

/// Trade direction carried in the `Trade_Type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeType {
    DomesticExports,
    ReExports,
    Imports,
}

impl TradeType {
    pub const ALL: [Self; 3] = [Self::DomesticExports, Self::ReExports, Self::Imports];

    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::DomesticExports),
            2 => Some(Self::ReExports),
            3 => Some(Self::Imports),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::DomesticExports => 1,
            Self::ReExports => 2,
            Self::Imports => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DomesticExports => "Domestic Exports",
            Self::ReExports => "Re-exports",
            Self::Imports => "Imports",
        }
    }
}

/// Normalized trade record returned to tool callers.
///
/// `category` and `trade_type` are `None` when the code is outside the known
/// tables. `value` and `percentage` are `None` when the source carries a
/// "not applicable" sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub year: i32,
    pub category_code: i32,
    pub category: Option<&'static str>,
    pub trade_type_code: i32,
    pub trade_type: Option<&'static str>,
    pub value: Option<i64>,
    pub percentage: Option<f64>,
}

/// Error payload returned in place of records when the dataset cannot be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub error: String,
}

impl ErrorResult {
    pub const KIND: &'static str = "Error";

    pub fn new(error: impl Into<String>) -> Self {
        Self {
            kind: Self::KIND,
            error: error.into(),
        }
    }
}

/// Result shape of a trade query: either the record list or an error object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TradeQueryOutcome {
    Records(Vec<TradeRecord>),
    Error(ErrorResult),
}

impl TradeQueryOutcome {
    #[must_use]
    pub fn records(&self) -> Option<&[TradeRecord]> {
        match self {
            Self::Records(records) => Some(records),
            Self::Error(_) => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&ErrorResult> {
        match self {
            Self::Records(_) => None,
            Self::Error(error) => Some(error),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_roundtrip_through_labels() {
        for category in CreativeGoodsCategory::ALL {
            assert_eq!(CreativeGoodsCategory::from_code(category.code()), Some(category));
        }
        assert_eq!(
            CreativeGoodsCategory::from_code(1).map(CreativeGoodsCategory::label),
            Some("Advertising")
        );
        assert_eq!(
            CreativeGoodsCategory::from_code(8).map(CreativeGoodsCategory::label),
            Some("Overall Creative Goods")
        );
        assert!(CreativeGoodsCategory::from_code(0).is_none());
        assert!(CreativeGoodsCategory::from_code(9).is_none());
    }

    #[test]
    fn trade_type_labels_match_codebook() {
        let labels: Vec<_> = TradeType::ALL
            .iter()
            .map(|kind| (kind.code(), kind.label()))
            .collect();
        assert_eq!(
            labels,
            vec![(1, "Domestic Exports"), (2, "Re-exports"), (3, "Imports")]
        );
        assert!(TradeType::from_code(4).is_none());
    }

    #[test]
    fn error_result_serializes_with_type_tag() {
        let outcome = TradeQueryOutcome::Error(ErrorResult::new("CSV fetch failed"));
        assert!(outcome.is_error());
        assert!(outcome.records().is_none());
        let value = serde_json::to_value(&outcome).expect("serialize outcome");
        assert_eq!(
            value,
            serde_json::json!({ "type": "Error", "error": "CSV fetch failed" })
        );
    }

    #[test]
    fn records_serialize_as_array_with_nulls() {
        let outcome = TradeQueryOutcome::Records(vec![TradeRecord {
            year: 2025,
            category_code: 9,
            category: None,
            trade_type_code: 1,
            trade_type: Some("Domestic Exports"),
            value: None,
            percentage: Some(12.5),
        }]);
        let value = serde_json::to_value(&outcome).expect("serialize outcome");
        assert_eq!(
            value,
            serde_json::json!([{
                "year": 2025,
                "category_code": 9,
                "category": null,
                "trade_type_code": 1,
                "trade_type": "Domestic Exports",
                "value": null,
                "percentage": 12.5
            }])
        );
    }
}
