use super::{
    api::{Lookup, Page, ReleaseApi, Repository},
    local_file::AssetUpload,
    release::{Asset, Release},
    request::{CreateReleaseRequest, UpdateReleaseRequest},
    tag::Tag,
};
use crate::{
    config::ClientConfig,
    http::{
        response::{AsyncFrom, Empty, Json, Response},
        Error, HttpClient,
    },
};
use anyhow::{Context, Result};
use reqwest::{
    header::{CONTENT_LENGTH, CONTENT_TYPE},
    Body, RequestBuilder,
};
use serde::de::DeserializeOwned;
use tokio_util::io::ReaderStream;
use url::Url;

/// [`ReleaseApi`] over the GitHub REST API.
pub struct GithubClient {
    http: HttpClient,
    base_url: String,
}

impl GithubClient {
    pub fn new(config: &ClientConfig) -> Self {
        GithubClient {
            http: HttpClient::new(config.token.to_owned()),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn releases_url(&self, repo: &Repository) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.base_url, repo.owner, repo.name
        )
    }

    async fn send<T>(request: RequestBuilder) -> Result<Response<Json, T>, Error>
    where
        T: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|cause| Error::SendRequestError { cause })?;

        Ok(Response::<Json, T>::async_from(response).await)
    }

    async fn send_empty(request: RequestBuilder) -> Result<(), Error> {
        let response = request
            .send()
            .await
            .map_err(|cause| Error::SendRequestError { cause })?;

        Response::<Empty, ()>::async_from(response).await.collect()
    }

    /// The releases URL with `segments` appended, each percent-encoded.
    fn release_url(&self, repo: &Repository, segments: &[&str]) -> Result<Url> {
        let releases_url = self.releases_url(repo);
        let mut url = Url::parse(&releases_url)
            .with_context(|| format!("Invalid base url {}", releases_url))?;

        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Base url {} cannot have a path", releases_url))?
            .extend(segments);

        Ok(url)
    }

    async fn lookup(&self, url: Url) -> Result<Lookup<Release>> {
        let response = Self::send::<Release>(self.http.get(url.as_str())).await?;

        if response.is_not_found() {
            log::debug!("{} not found", url);
            return Ok(Lookup::NotFound);
        }

        Ok(Lookup::Found(response.collect()?))
    }

    async fn page<T>(&self, url: String, page: u32) -> Result<Page<T>>
    where
        T: DeserializeOwned,
    {
        let request = self.http.get(&url).query(&[("page", page)]);
        let (items, next_page) = Self::send::<Vec<T>>(request).await?.collect_page()?;

        Ok(Page::new(items, next_page))
    }
}

impl ReleaseApi for GithubClient {
    async fn get_release_by_tag(&self, repo: &Repository, tag: &Tag) -> Result<Lookup<Release>> {
        self.lookup(self.release_url(repo, &["tags", tag.value()])?)
            .await
    }

    async fn get_release(&self, repo: &Repository, id: u64) -> Result<Lookup<Release>> {
        self.lookup(self.release_url(repo, &[id.to_string().as_str()])?)
            .await
    }

    async fn list_releases(&self, repo: &Repository, page: u32) -> Result<Page<Release>> {
        self.page(self.releases_url(repo), page)
            .await
            .with_context(|| format!("Cannot list releases of {}", repo))
    }

    async fn create_release(
        &self,
        repo: &Repository,
        request: &CreateReleaseRequest,
    ) -> Result<Release> {
        let release = Self::send::<Release>(self.http.post(self.releases_url(repo)).json(request))
            .await?
            .collect()?;

        Ok(release)
    }

    async fn update_release(
        &self,
        repo: &Repository,
        id: u64,
        request: &UpdateReleaseRequest,
    ) -> Result<Release> {
        let url = format!("{}/{}", self.releases_url(repo), id);
        let release = Self::send::<Release>(self.http.patch(url).json(request))
            .await?
            .collect()?;

        Ok(release)
    }

    async fn delete_release(&self, repo: &Repository, id: u64) -> Result<()> {
        let url = format!("{}/{}", self.releases_url(repo), id);
        Self::send_empty(self.http.delete(url)).await?;

        Ok(())
    }

    async fn list_assets(
        &self,
        repo: &Repository,
        release_id: u64,
        page: u32,
    ) -> Result<Page<Asset>> {
        let url = format!("{}/{}/assets", self.releases_url(repo), release_id);

        self.page(url, page).await
    }

    async fn upload_asset(&self, upload_endpoint: &str, upload: AssetUpload) -> Result<Asset> {
        let mut url = Url::parse(upload_endpoint)
            .with_context(|| format!("Invalid upload url {}", upload_endpoint))?;
        url.query_pairs_mut().append_pair("name", &upload.name);

        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, upload.content_type)
            .header(CONTENT_LENGTH, upload.content_length)
            .body(Body::wrap_stream(ReaderStream::new(upload.content)));

        let asset = Self::send::<Asset>(request).await?.collect()?;

        Ok(asset)
    }

    async fn delete_asset(&self, repo: &Repository, asset_id: u64) -> Result<()> {
        let url = format!(
            "{}/repos/{}/{}/releases/assets/{}",
            self.base_url, repo.owner, repo.name, asset_id
        );
        Self::send_empty(self.http.delete(url)).await?;

        Ok(())
    }
}
