use regex::{Captures, Regex};
use thiserror::Error;

/// Problems detected before any mutation is sent to the API.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("either a tag or a release id is required")]
    MissingSelector,
    #[error("a tag is required to create a release")]
    MissingTag,
    #[error("the repository {0} is not set")]
    MissingRepository(&'static str),
    #[error("no release found for {0}")]
    ReleaseNotFound(String),
    #[error("invalid glob pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        cause: glob::PatternError,
    },
}

const URL_PATTERN: &str = r"https?://\S*";

/// Removes the query string of every http(s) URL found in `message`.
///
/// Transport errors embed the request URL, and a query string may carry
/// credentials, so anything shown to the user goes through here first.
/// A URL runs up to the next whitespace; everything from its `?` on is dropped.
pub fn strip_url_queries(message: &str) -> Result<String, regex::Error> {
    let urls = Regex::new(URL_PATTERN)?;

    let stripped = urls.replace_all(message, |captures: &Captures| {
        let url = &captures[0];
        url.split_once('?')
            .map_or(url, |(base, _)| base)
            .to_owned()
    });

    Ok(stripped.into_owned())
}
