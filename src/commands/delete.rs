use crate::{
    error::ValidationError,
    github::{
        api::{ReleaseApi, Repository},
        reconciler::{AssetReconciler, PatternSet},
        resolver::{ReleaseResolver, ReleaseSelector},
    },
};
use anyhow::{Context, Result};
use itertools::Itertools;

/// Deletes the whole release when no pattern is given, otherwise only the
/// assets whose name matches one of `patterns`.
pub async fn delete<A, S>(
    api: &A,
    repo: &Repository,
    selector: &ReleaseSelector,
    patterns: &[S],
) -> Result<()>
where
    A: ReleaseApi,
    S: AsRef<str>,
{
    let patterns = PatternSet::new(patterns)?;

    let Some(release) = ReleaseResolver::new(api, repo).find(selector).await else {
        if patterns.is_empty() {
            log::info!("no release for {}, nothing to delete", selector);
            return Ok(());
        }
        return Err(ValidationError::ReleaseNotFound(selector.to_string()).into());
    };

    if patterns.is_empty() {
        log::info!("> deleteRelease: release_id={}", release.id);

        return api
            .delete_release(repo, release.id)
            .await
            .with_context(|| format!("Cannot delete release {}", release.id));
    }

    let reconciler = AssetReconciler::new(api, repo);
    let assets = reconciler.assets_to_delete(release.id, &patterns).await?;
    log::debug!(
        "matching assets: [{}]",
        assets.iter().map(|asset| &asset.name).join(", ")
    );

    reconciler.delete_assets(&assets).await
}
