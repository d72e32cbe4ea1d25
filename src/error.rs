use thiserror::Error;

/// An ingredient row whose cell count matches neither known site layout
/// (3 cells = old format, 1 cell = new format). This is the single fatal
/// parse case: a third layout means the extractor needs updating, so the
/// whole page is rejected instead of silently skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized ingredient row layout ({cells} cells)")]
pub struct UnknownFormatError {
    /// Number of `td` cells found in the offending row
    pub cells: usize,
}

/// Errors that can occur while scraping the recipe catalog
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Network-layer failure (timeout, DNS, non-2xx status). Recovered
    /// locally by the collector: the id is skipped, the batch continues.
    #[error("failed to fetch page: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Error building HTTP headers for the client
    #[error("header parse error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// A page's ingredient table used an unhandled layout. Fatal to the
    /// batch; names the offending recipe id.
    #[error("recipe {id}: {source}")]
    UnknownFormat {
        id: u64,
        #[source]
        source: UnknownFormatError,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
