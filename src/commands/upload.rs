use crate::github::{
    api::{ReleaseApi, Repository},
    release::Release,
    resolver::{ReleaseFields, ReleaseResolver, ReleaseSelector},
    uploader::UploadDispatcher,
};
use anyhow::Result;
use std::path::Path;

/// Creates or updates the release, then attaches `files` to it.
///
/// The release stays created/updated when an upload fails afterwards.
pub async fn upload<A, P>(
    api: &A,
    repo: &Repository,
    selector: &ReleaseSelector,
    fields: ReleaseFields,
    files: &[P],
) -> Result<Release>
where
    A: ReleaseApi,
    P: AsRef<Path>,
{
    let release = ReleaseResolver::new(api, repo)
        .resolve(selector, fields)
        .await?;

    UploadDispatcher::new(api).upload(&release, files).await?;

    Ok(release)
}
