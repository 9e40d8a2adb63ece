pub mod link;
pub mod response;

use reqwest::{
    header::{ACCEPT, USER_AGENT},
    Client, IntoUrl, RequestBuilder,
};
use thiserror::Error;

const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const USER_AGENT_NAME: &str = "ghreleaser";

/// reqwest client that stamps the API headers on every request.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(token: Option<String>) -> Self {
        HttpClient {
            client: Client::new(),
            token,
        }
    }

    pub fn get(&self, url: impl IntoUrl) -> RequestBuilder {
        self.client.get(url).default_headers(self.token.as_deref())
    }

    pub fn post(&self, url: impl IntoUrl) -> RequestBuilder {
        self.client.post(url).default_headers(self.token.as_deref())
    }

    pub fn patch(&self, url: impl IntoUrl) -> RequestBuilder {
        self.client.patch(url).default_headers(self.token.as_deref())
    }

    pub fn delete(&self, url: impl IntoUrl) -> RequestBuilder {
        self.client.delete(url).default_headers(self.token.as_deref())
    }
}

pub trait Headers {
    fn default_headers(self, token: Option<&str>) -> RequestBuilder;
}

impl Headers for RequestBuilder {
    fn default_headers(self, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header(USER_AGENT, USER_AGENT_NAME);

        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request failed with status {status}: {message}")]
    ResponseStatusError { status: u16, message: String },
    #[error("Failed to send request")]
    SendRequestError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to read response text")]
    ReadResponseTextError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to parse response")]
    ParseResponseError {
        #[source]
        cause: serde_json::Error,
    },
}
