use super::{
    api::{Lookup, ReleaseApi, Repository},
    paginator::Paginator,
    release::Release,
    request::{CreateReleaseRequest, UpdateReleaseRequest},
    tag::Tag,
};
use crate::error::ValidationError;
use anyhow::{Context, Result};
use std::fmt::{self, Display};

/// How the release of a command is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseSelector {
    Id(u64),
    Tag(Tag),
}

impl ReleaseSelector {
    /// An explicit id takes precedence over a tag.
    pub fn new(tag: Option<&Tag>, release_id: Option<u64>) -> Result<Self, ValidationError> {
        match (release_id, tag) {
            (Some(id), _) => Ok(ReleaseSelector::Id(id)),
            (None, Some(tag)) => Ok(ReleaseSelector::Tag(tag.to_owned())),
            (None, None) => Err(ValidationError::MissingSelector),
        }
    }
}

impl Display for ReleaseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseSelector::Id(id) => write!(f, "release_id={}", id),
            ReleaseSelector::Tag(tag) => write!(f, "tag={}", tag),
        }
    }
}

/// Release fields as supplied by the caller; `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseFields {
    pub tag: Option<Tag>,
    pub target_commitish: Option<String>,
    pub name: Option<String>,
    pub body: Option<String>,
    pub draft: Option<bool>,
    pub prerelease: Option<bool>,
}

impl ReleaseFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn target_commitish(mut self, target_commitish: impl Into<String>) -> Self {
        self.target_commitish = Some(target_commitish.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn draft(mut self, draft: bool) -> Self {
        self.draft = Some(draft);
        self
    }

    pub fn prerelease(mut self, prerelease: bool) -> Self {
        self.prerelease = Some(prerelease);
        self
    }

    /// Builds a creation request from the supplied fields only.
    pub fn into_create(self) -> Result<CreateReleaseRequest, ValidationError> {
        let tag = self.tag.ok_or(ValidationError::MissingTag)?;
        let name = non_empty(self.name).unwrap_or_else(|| tag.value().to_owned());

        Ok(CreateReleaseRequest::new(
            tag.value(),
            self.target_commitish,
            name,
            self.body.map(decode_body).unwrap_or_default(),
            self.draft.unwrap_or(false),
            self.prerelease.unwrap_or(false),
        ))
    }

    /// Builds an update request, taking every field not supplied from `existing`.
    ///
    /// Omitted `draft`/`prerelease` flags keep their current value.
    pub fn merge_onto(self, existing: &Release) -> UpdateReleaseRequest {
        let tag_name = merge(
            self.tag.map(|tag| tag.value().to_owned()),
            existing.tag_name.to_owned(),
        );
        let name = non_empty(self.name)
            .or_else(|| non_empty(existing.name.to_owned()))
            .unwrap_or_else(|| tag_name.to_owned());

        UpdateReleaseRequest {
            target_commitish: self
                .target_commitish
                .or_else(|| existing.target_commitish.to_owned()),
            name,
            body: merge(
                self.body.map(decode_body),
                existing.body.to_owned().unwrap_or_default(),
            ),
            draft: merge(self.draft, existing.draft),
            prerelease: merge(self.prerelease, existing.prerelease),
            tag_name,
        }
    }
}

fn merge<T>(supplied: Option<T>, existing: T) -> T {
    supplied.unwrap_or(existing)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Decodes a body given as a JSON string literal, e.g. `"line 1\nline 2"`.
/// Anything else is used verbatim.
pub fn decode_body(raw: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(serde_json::Value::String(decoded)) => decoded,
        _ => raw,
    }
}

/// Finds the release a command operates on, and creates or updates it.
pub struct ReleaseResolver<'a, A> {
    api: &'a A,
    repo: &'a Repository,
}

impl<'a, A> ReleaseResolver<'a, A>
where
    A: ReleaseApi,
{
    pub fn new(api: &'a A, repo: &'a Repository) -> Self {
        ReleaseResolver { api, repo }
    }

    /// Looks the release up, never failing: every miss or lookup error means
    /// "absent".
    pub async fn find(&self, selector: &ReleaseSelector) -> Option<Release> {
        match selector {
            ReleaseSelector::Id(id) => self.find_by_id(*id).await,
            ReleaseSelector::Tag(tag) => self.find_by_tag(tag).await,
        }
    }

    async fn find_by_id(&self, id: u64) -> Option<Release> {
        log::info!("> getRelease: repo={}, release_id={}", self.repo, id);

        match self.api.get_release(self.repo, id).await {
            Ok(lookup) => lookup.found(),
            Err(err) => {
                log::warn!("cannot get release {}: {:#}", id, err);
                None
            }
        }
    }

    async fn find_by_tag(&self, tag: &Tag) -> Option<Release> {
        log::info!("> getReleaseByTag: repo={}, tag={}", self.repo, tag);

        match self.api.get_release_by_tag(self.repo, tag).await {
            Ok(Lookup::Found(release)) if tag.is(&release.tag_name) => return Some(release),
            Ok(Lookup::Found(release)) => log::debug!(
                "lookup for tag {} answered with tag {}, scanning releases",
                tag,
                release.tag_name
            ),
            Ok(Lookup::NotFound) => log::debug!("no release tagged {}, scanning releases", tag),
            Err(err) => log::warn!("cannot get release by tag {}: {:#}", tag, err),
        }

        match self.scan_by_tag(tag).await {
            Ok(Some(release)) => Some(release),
            Ok(None) => {
                log::info!("No release found.");
                None
            }
            Err(err) => {
                log::warn!("cannot list releases: {:#}", err);
                None
            }
        }
    }

    /// Tag lookups miss drafts, so the full listing is scanned as well.
    async fn scan_by_tag(&self, tag: &Tag) -> Result<Option<Release>> {
        let (api, repo) = (self.api, self.repo);
        let mut pages = Paginator::new(move |page| api.list_releases(repo, page));

        while let Some(releases) = pages.next_page().await? {
            if let Some(release) = releases.into_iter().find(|release| tag.is(&release.tag_name)) {
                return Ok(Some(release));
            }
        }

        Ok(None)
    }

    /// Creates the release when absent, updates it otherwise. Exactly one
    /// mutation is sent.
    pub async fn resolve(&self, selector: &ReleaseSelector, fields: ReleaseFields) -> Result<Release> {
        match self.find(selector).await {
            Some(existing) => self.update(&existing, fields).await,
            None => self.create(fields).await,
        }
    }

    async fn create(&self, fields: ReleaseFields) -> Result<Release> {
        let request = fields.into_create()?;

        log::info!(
            "> createRelease: tag_name={}, target_commitish={}, name={}, draft={}, prerelease={}",
            request.tag_name,
            request.target_commitish.as_deref().unwrap_or_default(),
            request.name,
            request.draft,
            request.prerelease
        );

        self.api
            .create_release(self.repo, &request)
            .await
            .with_context(|| format!("Cannot create release {}", request.tag_name))
    }

    async fn update(&self, existing: &Release, fields: ReleaseFields) -> Result<Release> {
        let request = fields.merge_onto(existing);

        log::info!(
            "> updateRelease: release_id={}, tag_name={}, name={}, draft={}, prerelease={}",
            existing.id,
            request.tag_name,
            request.name,
            request.draft,
            request.prerelease
        );

        self.api
            .update_release(self.repo, existing.id, &request)
            .await
            .with_context(|| format!("Cannot update release {}", existing.id))
    }
}
