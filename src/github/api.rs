use super::{
    local_file::AssetUpload,
    release::{Asset, Release},
    request::{CreateReleaseRequest, UpdateReleaseRequest},
    tag::Tag,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Repository {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Outcome of a lookup that is allowed to miss.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }
}

/// One page of a listing plus the page number the server points to next.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page: Option<u32>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page: Option<u32>) -> Self {
        Page { items, next_page }
    }
}

/// The release endpoints the commands are built on.
///
/// Misses on lookups come back as [`Lookup::NotFound`]; an `Err` always means
/// the call itself failed.
pub trait ReleaseApi {
    async fn get_release_by_tag(&self, repo: &Repository, tag: &Tag) -> Result<Lookup<Release>>;

    async fn get_release(&self, repo: &Repository, id: u64) -> Result<Lookup<Release>>;

    async fn list_releases(&self, repo: &Repository, page: u32) -> Result<Page<Release>>;

    async fn create_release(
        &self,
        repo: &Repository,
        request: &CreateReleaseRequest,
    ) -> Result<Release>;

    async fn update_release(
        &self,
        repo: &Repository,
        id: u64,
        request: &UpdateReleaseRequest,
    ) -> Result<Release>;

    async fn delete_release(&self, repo: &Repository, id: u64) -> Result<()>;

    async fn list_assets(&self, repo: &Repository, release_id: u64, page: u32)
        -> Result<Page<Asset>>;

    async fn upload_asset(&self, upload_endpoint: &str, upload: AssetUpload) -> Result<Asset>;

    async fn delete_asset(&self, repo: &Repository, asset_id: u64) -> Result<()>;
}
