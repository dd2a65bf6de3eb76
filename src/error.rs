use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Error type covering the different failure cases of an export run, from
/// input validation through the WMS API calls to writing the spreadsheet.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Raised when a required credential or identifier was left empty.
    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    /// Raised when the unit identifier is not a UUID.
    #[error("invalid unit id '{value}': {source}")]
    InvalidUnitId {
        value: String,
        #[source]
        source: uuid::Error,
    },

    /// The token endpoint answered with a non-200 status.
    #[error("authentication failed with status {status}")]
    AuthRejected { status: u16 },

    /// The token request could not be completed or its body decoded.
    #[error("authentication request failed: {0}")]
    AuthTransport(#[source] reqwest::Error),

    /// The products endpoint answered with a non-200 status.
    #[error("error fetching page {page}: status {status}")]
    PageRejected { page: u32, status: u16 },

    /// The products request could not be completed or its body decoded.
    #[error("error fetching page {page}: {source}")]
    PageTransport {
        page: u32,
        #[source]
        source: reqwest::Error,
    },

    /// Pagination stopped because the configured bound was reached while the
    /// server still reported more pages.
    #[error("stopped after {max_pages} pages while the server still reported more")]
    PageLimitReached { max_pages: u32 },

    /// Raised when the HTTP client itself cannot be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Wrapper for IO failures such as writing the exported file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when reading a masked value from the terminal fails.
    #[error("failed to read {field} from terminal: {source}")]
    Prompt {
        field: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ExportError {
    /// Returns `true` when the error happened while authenticating, meaning no
    /// product request was ever issued.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthRejected { .. } | Self::AuthTransport(_))
    }
}
