use super::{
    api::ReleaseApi,
    local_file::LocalFile,
    release::{Asset, Release},
};
use anyhow::{Context, Result};
use std::path::Path;

/// Uploads local files to a release, one at a time and in the given order.
pub struct UploadDispatcher<'a, A> {
    api: &'a A,
}

impl<'a, A> UploadDispatcher<'a, A>
where
    A: ReleaseApi,
{
    pub fn new(api: &'a A) -> Self {
        UploadDispatcher { api }
    }

    /// Stops at the first failure; assets uploaded before it are left in place.
    pub async fn upload<P>(&self, release: &Release, files: &[P]) -> Result<Vec<Asset>>
    where
        P: AsRef<Path>,
    {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        log::info!("> uploadReleaseAsset: assets_url={}", release.assets_url);

        let mut uploaded = Vec::with_capacity(files.len());
        for (index, path) in files.iter().enumerate() {
            let path = path.as_ref();
            let file = LocalFile::inspect(path).await?;

            log::info!(
                "  #{}: name={:?} filePath={:?}",
                index + 1,
                file.name,
                path.display().to_string()
            );
            log::debug!("content_type={}, content_length={}", file.content_type, file.size);

            let name = file.name.to_owned();
            let asset = self
                .api
                .upload_asset(release.upload_endpoint(), file.open().await?)
                .await
                .with_context(|| format!("Cannot upload asset {}", name))?;

            uploaded.push(asset);
        }

        Ok(uploaded)
    }
}
