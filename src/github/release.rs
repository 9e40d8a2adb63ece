use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Snapshot of a release as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    #[serde(default)]
    pub target_commitish: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub upload_url: String,
    #[serde(default)]
    pub assets_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Release {
    /// The asset upload endpoint without its `{?name,label}` URI template suffix.
    pub fn upload_endpoint(&self) -> &str {
        self.upload_url
            .split_once('{')
            .map_or(self.upload_url.as_str(), |(endpoint, _)| endpoint)
    }

    pub fn kind(&self) -> ReleaseKind {
        if self.prerelease {
            ReleaseKind::PreRelease
        } else if self.draft {
            ReleaseKind::Draft
        } else {
            ReleaseKind::Release
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    Release,
    Draft,
    PreRelease,
}

impl Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReleaseKind::Release => "RELEASE",
            ReleaseKind::Draft => "DRAFT",
            ReleaseKind::PreRelease => "PRERELEASE",
        };
        f.write_str(label)
    }
}

/// A binary file attached to a release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}
