use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReleaseRequest {
    pub tag_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

impl CreateReleaseRequest {
    pub fn new(
        tag_name: impl Into<String>,
        target_commitish: Option<String>,
        name: impl Into<String>,
        body: impl Into<String>,
        draft: bool,
        prerelease: bool,
    ) -> Self {
        Self {
            tag_name: tag_name.into(),
            target_commitish,
            name: name.into(),
            body: body.into(),
            draft,
            prerelease,
        }
    }
}
