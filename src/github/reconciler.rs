use super::{
    api::{ReleaseApi, Repository},
    paginator::Paginator,
    release::Asset,
};
use crate::error::ValidationError;
use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Glob patterns matched against asset names; an asset matches if any pattern does.
#[derive(Debug, Clone, Default)]
pub struct PatternSet(Vec<Pattern>);

impl PatternSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ValidationError> {
        patterns
            .iter()
            .map(|pattern| {
                Pattern::new(&collapse_stars(pattern.as_ref())).map_err(|cause| {
                    ValidationError::InvalidPattern {
                        pattern: pattern.as_ref().to_owned(),
                        cause,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(PatternSet)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.0
            .iter()
            .any(|pattern| pattern.matches_with(name, MATCH_OPTIONS))
    }

    /// Keeps the assets matching at least one pattern, in their original order.
    pub fn select(&self, assets: Vec<Asset>) -> Vec<Asset> {
        assets
            .into_iter()
            .filter(|asset| self.matches(&asset.name))
            .collect()
    }
}

/// Asset names have no path separators, so `**` means the same as `*`.
/// `glob` only accepts `**` as a whole path component.
fn collapse_stars(pattern: &str) -> String {
    let mut collapsed = String::with_capacity(pattern.len());

    for c in pattern.chars() {
        if c == '*' && collapsed.ends_with('*') {
            continue;
        }
        collapsed.push(c);
    }

    collapsed
}

pub struct AssetReconciler<'a, A> {
    api: &'a A,
    repo: &'a Repository,
}

impl<'a, A> AssetReconciler<'a, A>
where
    A: ReleaseApi,
{
    pub fn new(api: &'a A, repo: &'a Repository) -> Self {
        AssetReconciler { api, repo }
    }

    pub async fn list_assets(&self, release_id: u64) -> Result<Vec<Asset>> {
        log::info!("> listAssetsForRelease: release_id={}", release_id);

        let (api, repo) = (self.api, self.repo);
        Paginator::new(move |page| api.list_assets(repo, release_id, page))
            .collect_all()
            .await
            .with_context(|| format!("Cannot list assets of release {}", release_id))
    }

    /// Lists every asset of the release and keeps the ones matching `patterns`.
    pub async fn assets_to_delete(
        &self,
        release_id: u64,
        patterns: &PatternSet,
    ) -> Result<Vec<Asset>> {
        if patterns.is_empty() {
            return Ok(Vec::new());
        }

        let assets = self.list_assets(release_id).await?;
        let total = assets.len();
        let selected = patterns.select(assets);

        log::info!("  assets={}, deleteAssets={}", total, selected.len());

        Ok(selected)
    }

    /// Deletes assets one by one, stopping at the first failure.
    pub async fn delete_assets(&self, assets: &[Asset]) -> Result<()> {
        if assets.is_empty() {
            return Ok(());
        }

        log::info!("> deleteReleaseAsset:");
        for (index, asset) in assets.iter().enumerate() {
            log::info!(
                "  #{}: id={}, name={:?}, label={:?}, state={}, size={}, download_count={}, created_at={}, updated_at={}",
                index + 1,
                asset.id,
                asset.name,
                asset.label,
                asset.state,
                asset.size,
                asset.download_count,
                asset.created_at,
                asset.updated_at
            );

            self.api
                .delete_asset(self.repo, asset.id)
                .await
                .with_context(|| format!("Cannot delete asset {}", asset.name))?;
        }

        Ok(())
    }
}
