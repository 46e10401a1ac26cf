use ::scraper::error::SelectorErrorKind;

/// All errors that can occur while fetching and normalizing ESPN league tables.
#[derive(thiserror::Error, Debug)]
pub enum EspnError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// A field extraction pattern could not be compiled.
    #[error("invalid extraction pattern: {0}")]
    Regex(#[from] regex::Error),

    /// The table header rows do not form one of the supported layouts.
    #[error("malformed table header ({sub_headers} sub-header rows): {reason}")]
    MalformedHeader {
        sub_headers: usize,
        reason: &'static str,
    },

    /// The draft recap page announced a draft type we cannot format.
    #[error("unsupported draft type: {0:?}")]
    UnsupportedDraftType(String),

    /// A team identifier is not part of the league.
    #[error("team {0} not found in league")]
    TeamNotFound(String),

    /// A column required by a formatter is absent from the table.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// The resolved header does not line up with the table body.
    #[error("header has {expected} columns but table body has {found}")]
    ColumnCountMismatch { expected: usize, found: usize },

    /// A column was given a different number of values than the table has rows.
    #[error("column {column} has {found} values, table has {expected} rows")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },
}

impl<'a> From<SelectorErrorKind<'a>> for EspnError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        EspnError::Selector(err.to_string())
    }
}

impl EspnError {
    /// Whether this error came from the page fetch layer rather than from parsing.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            EspnError::Http { .. } | EspnError::UnexpectedStatus { .. } | EspnError::ResponseBody { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EspnError>;
