use std::str::FromStr;

use tracing::{debug, warn};

use crate::fetch::TableFetcher;
use crate::models::{
    CreativeGoodsCategory,
    ErrorResult,
    RawRow,
    TradeQueryOutcome,
    TradeRecord,
    TradeType,
};
use crate::schema::{
    COL_CATEGORY,
    COL_PERCENTAGE,
    COL_TRADE_TYPE,
    COL_VALUES,
    COL_YEAR,
    DATASET_ENCODING,
    is_percentage_sentinel,
    is_value_sentinel,
};

use super::{NormalizeError, RecreationControlPlane};

/// Inclusive year bounds; a missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearRange {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

impl YearRange {
    #[must_use]
    pub const fn new(start: Option<i32>, end: Option<i32>) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        let after_start = match self.start {
            Some(start) => year >= start,
            None => true,
        };
        let before_end = match self.end {
            Some(end) => year <= end,
            None => true,
        };
        after_start && before_end
    }
}

impl<F: TableFetcher> RecreationControlPlane<F> {
    /// Fetches the creative goods trade dataset and returns normalized records
    /// for the requested year range.
    ///
    /// A failed fetch is not an `Err`: it yields `TradeQueryOutcome::Error`
    /// carrying the fetcher's message.
    ///
    /// # Errors
    /// Returns `NormalizeError` if a retained row is missing a column or holds
    /// a value that does not parse.
    pub async fn get_creative_goods_trade(
        &self,
        start_year: Option<i32>,
        end_year: Option<i32>,
    ) -> Result<TradeQueryOutcome, NormalizeError> {
        let rows = match self
            .fetcher
            .fetch_table(&self.dataset_url, DATASET_ENCODING)
            .await
        {
            Ok(rows) => rows,
            Err(err) => {
                warn!(url = %self.dataset_url, error = %err, "creative goods trade fetch failed");
                return Ok(TradeQueryOutcome::Error(ErrorResult::new(err.to_string())));
            }
        };

        let range = YearRange::new(start_year, end_year);
        let records = normalize_rows(&rows, range)?;
        debug!(
            fetched = rows.len(),
            returned = records.len(),
            ?start_year,
            ?end_year,
            "normalized creative goods trade rows"
        );
        Ok(TradeQueryOutcome::Records(records))
    }
}

/// Filters rows by `range` on their `Year` column and normalizes the survivors
/// in source order.
///
/// # Errors
/// Returns `NormalizeError` for a malformed `Year` when filtering, or for any
/// malformed field of a retained row.
pub fn normalize_rows(
    rows: &[RawRow],
    range: YearRange,
) -> Result<Vec<TradeRecord>, NormalizeError> {
    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        if !range.is_unbounded() {
            let year: i32 = parse_field(row, index, COL_YEAR)?;
            if !range.contains(year) {
                continue;
            }
        }
        records.push(normalize_row(row, index)?);
    }
    Ok(records)
}

/// Converts one raw row into a trade record. `index` is only used for error
/// reporting.
///
/// # Errors
/// Returns `NormalizeError` if a column is missing or does not parse.
pub fn normalize_row(row: &RawRow, index: usize) -> Result<TradeRecord, NormalizeError> {
    let year = parse_field(row, index, COL_YEAR)?;
    let category_code = parse_field(row, index, COL_CATEGORY)?;
    let trade_type_code = parse_field(row, index, COL_TRADE_TYPE)?;

    let raw_value = field(row, index, COL_VALUES)?;
    let value = if is_value_sentinel(raw_value) {
        None
    } else {
        Some(parse_value(raw_value, index, COL_VALUES)?)
    };

    let raw_percentage = field(row, index, COL_PERCENTAGE)?;
    let percentage = if is_percentage_sentinel(raw_percentage) {
        None
    } else {
        // `%` must be the last character; surrounding whitespace is trimmed afterwards.
        let number = raw_percentage.trim_end_matches('%');
        Some(parse_value(number, index, COL_PERCENTAGE)?)
    };

    Ok(TradeRecord {
        year,
        category_code,
        category: CreativeGoodsCategory::from_code(category_code).map(CreativeGoodsCategory::label),
        trade_type_code,
        trade_type: TradeType::from_code(trade_type_code).map(TradeType::label),
        value,
        percentage,
    })
}

fn field<'a>(
    row: &'a RawRow,
    index: usize,
    column: &'static str,
) -> Result<&'a str, NormalizeError> {
    row.get(column)
        .ok_or(NormalizeError::MissingColumn { row: index, column })
}

fn parse_field<T: FromStr>(
    row: &RawRow,
    index: usize,
    column: &'static str,
) -> Result<T, NormalizeError> {
    parse_value(field(row, index, column)?, index, column)
}

fn parse_value<T: FromStr>(
    raw: &str,
    index: usize,
    column: &'static str,
) -> Result<T, NormalizeError> {
    raw.trim().parse().map_err(|_| NormalizeError::InvalidValue {
        row: index,
        column,
        value: raw.to_string(),
    })
}
