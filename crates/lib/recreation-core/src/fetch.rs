//! Tabular dataset fetching.
//!
//! The control plane only depends on [`TableFetcher`]; [`HttpCsvFetcher`] is the
//! production implementation backed by `reqwest` and the `csv` reader.

use std::{error::Error, fmt, future::Future, time::Duration};

use tracing::debug;

use crate::models::RawRow;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Request,
    Status,
    Decode,
    Csv,
}

/// Failure to retrieve or parse an upstream table.
///
/// The display form is the bare message so it can be relayed to callers as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(FetchErrorKind::Request, format!("Failed to fetch data: {err}"))
    }
}

impl From<csv::Error> for FetchError {
    fn from(err: csv::Error) -> Self {
        Self::new(FetchErrorKind::Csv, format!("Failed to parse CSV: {err}"))
    }
}

/// Source of header-keyed rows for a dataset URL.
pub trait TableFetcher: Send + Sync + 'static {
    /// Fetches `url`, decodes it with `encoding`, and parses it into rows in
    /// source order.
    fn fetch_table(
        &self,
        url: &str,
        encoding: &str,
    ) -> impl Future<Output = Result<Vec<RawRow>, FetchError>> + Send;
}

/// HTTP GET + CSV parse fetcher.
#[derive(Debug, Clone)]
pub struct HttpCsvFetcher {
    client: reqwest::Client,
}

impl HttpCsvFetcher {
    /// Builds a fetcher whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns `FetchError` if the HTTP client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl TableFetcher for HttpCsvFetcher {
    async fn fetch_table(&self, url: &str, encoding: &str) -> Result<Vec<RawRow>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FetchErrorKind::Status,
                format!("Failed to fetch data: HTTP {status} from {url}"),
            ));
        }

        let text = response.text_with_charset(encoding).await.map_err(|err| {
            FetchError::new(
                FetchErrorKind::Decode,
                format!("Failed to decode data as {encoding}: {err}"),
            )
        })?;

        let rows = parse_table(&text)?;
        debug!(url, rows = rows.len(), "fetched csv table");
        Ok(rows)
    }
}

/// Parses CSV text whose first record is the header row.
///
/// Every data record must have as many fields as the header.
///
/// # Errors
/// Returns `FetchError` with kind `Csv` if the text is not well-formed CSV.
pub fn parse_table(text: &str) -> Result<Vec<RawRow>, FetchError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(headers.iter().zip(record.iter()).collect::<RawRow>());
    }
    Ok(rows)
}
