//! In-memory [`ReleaseApi`] recording every call it receives.

use super::{
    api::{Lookup, Page, ReleaseApi, Repository},
    local_file::AssetUpload,
    release::{Asset, Release},
    request::{CreateReleaseRequest, UpdateReleaseRequest},
    tag::Tag,
};
use anyhow::{bail, Result};
use std::cell::RefCell;

const DEFAULT_PAGE_SIZE: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetReleaseByTag(String),
    GetRelease(u64),
    ListReleases(u32),
    CreateRelease(CreateReleaseRequest),
    UpdateRelease(u64, UpdateReleaseRequest),
    DeleteRelease(u64),
    ListAssets(u64, u32),
    UploadAsset {
        endpoint: String,
        name: String,
        content_type: String,
        content_length: u64,
    },
    DeleteAsset(u64),
}

pub fn release(id: u64, tag: &str) -> Release {
    Release {
        id,
        tag_name: tag.to_owned(),
        target_commitish: Some("main".to_owned()),
        name: Some(tag.to_owned()),
        body: None,
        draft: false,
        prerelease: false,
        upload_url: format!(
            "https://uploads.example.com/repos/owner/repo/releases/{}/assets{{?name,label}}",
            id
        ),
        assets_url: format!("https://api.example.com/repos/owner/repo/releases/{}/assets", id),
        created_at: Some("2024-01-01T00:00:00Z".to_owned()),
        published_at: None,
    }
}

pub fn asset(id: u64, name: &str) -> Asset {
    Asset {
        id,
        name: name.to_owned(),
        label: None,
        state: "uploaded".to_owned(),
        size: 1,
        download_count: 0,
        created_at: "2024-01-01T00:00:00Z".to_owned(),
        updated_at: "2024-01-01T00:00:00Z".to_owned(),
    }
}

#[derive(Default)]
struct State {
    releases: Vec<Release>,
    assets: Vec<(u64, Asset)>,
    calls: Vec<Call>,
}

pub struct FakeApi {
    state: RefCell<State>,
    page_size: usize,
    tag_lookup: bool,
    tag_lookup_answer: Option<Release>,
    failing_lookups: bool,
    failing_mutations: bool,
    failing_uploads: Vec<String>,
    failing_asset_deletes: Vec<u64>,
}

impl FakeApi {
    pub fn new() -> Self {
        FakeApi {
            state: RefCell::new(State::default()),
            page_size: DEFAULT_PAGE_SIZE,
            tag_lookup: true,
            tag_lookup_answer: None,
            failing_lookups: false,
            failing_mutations: false,
            failing_uploads: Vec::new(),
            failing_asset_deletes: Vec::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Makes the direct tag lookup miss, as it does for draft releases.
    pub fn without_tag_lookup(mut self) -> Self {
        self.tag_lookup = false;
        self
    }

    /// Makes every tag lookup return `release`, whatever tag was asked for.
    pub fn with_tag_lookup_answer(mut self, release: Release) -> Self {
        self.tag_lookup_answer = Some(release);
        self
    }

    pub fn with_failing_lookups(mut self) -> Self {
        self.failing_lookups = true;
        self
    }

    pub fn with_failing_mutations(mut self) -> Self {
        self.failing_mutations = true;
        self
    }

    pub fn with_failing_upload(mut self, name: &str) -> Self {
        self.failing_uploads.push(name.to_owned());
        self
    }

    pub fn with_failing_asset_delete(mut self, asset_id: u64) -> Self {
        self.failing_asset_deletes.push(asset_id);
        self
    }

    pub fn with_release(self, release: Release) -> Self {
        self.state.borrow_mut().releases.push(release);
        self
    }

    pub fn with_asset(self, release_id: u64, asset: Asset) -> Self {
        self.state.borrow_mut().assets.push((release_id, asset));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn release_count(&self) -> usize {
        self.state.borrow().releases.len()
    }

    pub fn release(&self, id: u64) -> Option<Release> {
        self.state
            .borrow()
            .releases
            .iter()
            .find(|release| release.id == id)
            .cloned()
    }

    pub fn asset_names(&self, release_id: u64) -> Vec<String> {
        self.state
            .borrow()
            .assets
            .iter()
            .filter(|(owner, _)| *owner == release_id)
            .map(|(_, asset)| asset.name.to_owned())
            .collect()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn page<T: Clone>(&self, items: Vec<T>, page: u32) -> Page<T> {
        let start = (page.max(1) as usize - 1) * self.page_size;
        let next_page = (start + self.page_size < items.len()).then_some(page + 1);

        Page::new(
            items.into_iter().skip(start).take(self.page_size).collect(),
            next_page,
        )
    }

    fn check_lookup(&self) -> Result<()> {
        if self.failing_lookups {
            bail!("lookup failed with status 500");
        }
        Ok(())
    }

    fn check_mutation(&self) -> Result<()> {
        if self.failing_mutations {
            bail!("mutation failed with status 422");
        }
        Ok(())
    }
}

impl ReleaseApi for FakeApi {
    async fn get_release_by_tag(&self, _repo: &Repository, tag: &Tag) -> Result<Lookup<Release>> {
        self.record(Call::GetReleaseByTag(tag.value().to_owned()));
        self.check_lookup()?;

        if !self.tag_lookup {
            return Ok(Lookup::NotFound);
        }

        if let Some(answer) = &self.tag_lookup_answer {
            return Ok(Lookup::Found(answer.to_owned()));
        }

        let state = self.state.borrow();
        Ok(state
            .releases
            .iter()
            .find(|release| tag.is(&release.tag_name))
            .cloned()
            .map_or(Lookup::NotFound, Lookup::Found))
    }

    async fn get_release(&self, _repo: &Repository, id: u64) -> Result<Lookup<Release>> {
        self.record(Call::GetRelease(id));
        self.check_lookup()?;

        Ok(self.release(id).map_or(Lookup::NotFound, Lookup::Found))
    }

    async fn list_releases(&self, _repo: &Repository, page: u32) -> Result<Page<Release>> {
        self.record(Call::ListReleases(page));
        self.check_lookup()?;

        let releases = self.state.borrow().releases.clone();
        Ok(self.page(releases, page))
    }

    async fn create_release(
        &self,
        _repo: &Repository,
        request: &CreateReleaseRequest,
    ) -> Result<Release> {
        self.record(Call::CreateRelease(request.to_owned()));
        self.check_mutation()?;

        let mut state = self.state.borrow_mut();
        let id = state.releases.iter().map(|release| release.id).max().unwrap_or(0) + 1;

        let mut created = release(id, &request.tag_name);
        created.target_commitish = request.target_commitish.to_owned();
        created.name = Some(request.name.to_owned());
        created.body = Some(request.body.to_owned());
        created.draft = request.draft;
        created.prerelease = request.prerelease;

        state.releases.push(created.to_owned());
        Ok(created)
    }

    async fn update_release(
        &self,
        _repo: &Repository,
        id: u64,
        request: &UpdateReleaseRequest,
    ) -> Result<Release> {
        self.record(Call::UpdateRelease(id, request.to_owned()));
        self.check_mutation()?;

        let mut state = self.state.borrow_mut();
        let Some(existing) = state.releases.iter_mut().find(|release| release.id == id) else {
            bail!("release {} not found", id);
        };

        existing.tag_name = request.tag_name.to_owned();
        existing.target_commitish = request.target_commitish.to_owned();
        existing.name = Some(request.name.to_owned());
        existing.body = Some(request.body.to_owned());
        existing.draft = request.draft;
        existing.prerelease = request.prerelease;

        Ok(existing.to_owned())
    }

    async fn delete_release(&self, _repo: &Repository, id: u64) -> Result<()> {
        self.record(Call::DeleteRelease(id));
        self.check_mutation()?;

        let mut state = self.state.borrow_mut();
        state.releases.retain(|release| release.id != id);
        state.assets.retain(|(owner, _)| *owner != id);
        Ok(())
    }

    async fn list_assets(&self, _repo: &Repository, release_id: u64, page: u32) -> Result<Page<Asset>> {
        self.record(Call::ListAssets(release_id, page));
        self.check_lookup()?;

        let assets: Vec<Asset> = self
            .state
            .borrow()
            .assets
            .iter()
            .filter(|(owner, _)| *owner == release_id)
            .map(|(_, asset)| asset.to_owned())
            .collect();
        Ok(self.page(assets, page))
    }

    async fn upload_asset(&self, upload_endpoint: &str, upload: AssetUpload) -> Result<Asset> {
        self.record(Call::UploadAsset {
            endpoint: upload_endpoint.to_owned(),
            name: upload.name.to_owned(),
            content_type: upload.content_type.to_owned(),
            content_length: upload.content_length,
        });

        if self.failing_uploads.contains(&upload.name) {
            bail!("upload of {} failed", upload.name);
        }

        let mut state = self.state.borrow_mut();
        let Some(release_id) = state
            .releases
            .iter()
            .find(|release| release.upload_endpoint() == upload_endpoint)
            .map(|release| release.id)
        else {
            bail!("no release accepts uploads at {}", upload_endpoint);
        };

        let id = state.assets.iter().map(|(_, asset)| asset.id).max().unwrap_or(0) + 1;
        let mut uploaded = asset(id, &upload.name);
        uploaded.size = upload.content_length;

        state.assets.push((release_id, uploaded.to_owned()));
        Ok(uploaded)
    }

    async fn delete_asset(&self, _repo: &Repository, asset_id: u64) -> Result<()> {
        self.record(Call::DeleteAsset(asset_id));

        if self.failing_asset_deletes.contains(&asset_id) {
            bail!("delete of asset {} failed", asset_id);
        }

        self.state
            .borrow_mut()
            .assets
            .retain(|(_, asset)| asset.id != asset_id);
        Ok(())
    }
}
