use crate::github::{
    api::{ReleaseApi, Repository},
    paginator::Paginator,
    release::Release,
};
use anyhow::{Context, Result};
use std::io::Write;

/// Writes one line per release of the repository to `out`.
pub async fn list<A, W>(api: &A, repo: &Repository, out: &mut W) -> Result<()>
where
    A: ReleaseApi,
    W: Write,
{
    log::debug!("listing releases of {}", repo);

    let releases = Paginator::new(move |page| api.list_releases(repo, page))
        .collect_all()
        .await?;

    for release in &releases {
        writeln!(out, "{}", report_line(release)).context("Cannot write release list")?;
    }

    Ok(())
}

fn report_line(release: &Release) -> String {
    format!(
        "[{}] id={}, tag_name={}, name={}, created_at={}, published_at={}",
        release.kind(),
        release.id,
        quoted(Some(release.tag_name.as_str())),
        quoted(release.name.as_deref()),
        release.created_at.as_deref().unwrap_or("null"),
        release.published_at.as_deref().unwrap_or("null"),
    )
}

fn quoted(value: Option<&str>) -> String {
    serde_json::to_string(&value).unwrap_or_else(|_| "null".to_owned())
}
