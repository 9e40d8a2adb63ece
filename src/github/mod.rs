pub mod api;
#[cfg(test)]
pub mod fake;
pub mod github_client;
pub mod local_file;
pub mod paginator;
pub mod reconciler;
pub mod release;
pub mod request;
pub mod resolver;
pub mod tag;
pub mod uploader;
