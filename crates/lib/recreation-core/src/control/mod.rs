use std::{error::Error, fmt, sync::Arc};

use crate::fetch::TableFetcher;
use crate::schema::CREATIVE_GOODS_TRADE_URL;

pub mod trade;

pub use trade::{YearRange, normalize_row, normalize_rows};

/// A fetched row that does not match the published column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    MissingColumn {
        row: usize,
        column: &'static str,
    },
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn { row, column } => {
                write!(f, "data row {row} is missing column {column}")
            }
            Self::InvalidValue { row, column, value } => {
                write!(f, "data row {row} has invalid {column} value: {value:?}")
            }
        }
    }
}

impl Error for NormalizeError {}

pub struct RecreationControlPlane<F: TableFetcher> {
    fetcher: Arc<F>,
    dataset_url: String,
}

impl<F: TableFetcher> Clone for RecreationControlPlane<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            dataset_url: self.dataset_url.clone(),
        }
    }
}

impl<F: TableFetcher> RecreationControlPlane<F> {
    pub fn new(fetcher: F) -> Self {
        Self::from_arc(Arc::new(fetcher))
    }

    pub fn from_arc(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            dataset_url: CREATIVE_GOODS_TRADE_URL.to_string(),
        }
    }

    /// Points the creative goods trade query at a different copy of the CSV.
    #[must_use]
    pub fn with_dataset_url(mut self, dataset_url: impl Into<String>) -> Self {
        self.dataset_url = dataset_url.into();
        self
    }

    pub fn dataset_url(&self) -> &str {
        &self.dataset_url
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}
