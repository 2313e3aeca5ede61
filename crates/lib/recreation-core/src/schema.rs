pub const CREATIVE_GOODS_TRADE_URL: &str = "https://www.ccidahk.gov.hk/data/SCG_TradeTOT.csv";
pub const DATASET_ENCODING: &str = "utf-8";

pub const COL_YEAR: &str = "Year";
pub const COL_CATEGORY: &str = "CI_Goods_Cat";
pub const COL_TRADE_TYPE: &str = "Trade_Type";
pub const COL_VALUES: &str = "Values";
pub const COL_PERCENTAGE: &str = "Percentage";
pub const COL_LAST_UPDATE: &str = "Last Update";

/// Raw `Values` codes the dataset uses for "not applicable" and "not available".
pub const VALUE_SENTINELS: [&str; 2] = ["999999998", "999999999"];
/// Raw `Percentage` codes the dataset uses for "not applicable" and "not available".
pub const PERCENTAGE_SENTINELS: [&str; 2] = ["999.8%", "999.9%"];

#[must_use]
pub fn is_value_sentinel(raw: &str) -> bool {
    VALUE_SENTINELS.contains(&raw)
}

#[must_use]
pub fn is_percentage_sentinel(raw: &str) -> bool {
    PERCENTAGE_SENTINELS.contains(&raw)
}
