use serde::{Deserialize, Serialize};

/// Full replacement of a release's editable fields.
///
/// Every field is always sent; values the caller did not supply are filled
/// from the existing release before the request is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateReleaseRequest {
    pub tag_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}
