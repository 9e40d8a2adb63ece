use crate::{
    config::Overrides,
    github::{resolver::ReleaseFields, tag::Tag},
};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ghreleaser", version)]
#[command(about = "Create, update, list and delete GitHub releases and their assets")]
pub struct Cli {
    /// API endpoint
    #[arg(long = "baseurl", global = true)]
    pub base_url: Option<String>,

    /// OAuth2 token
    #[arg(short = 'T', long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// The repository owner
    #[arg(short, long, global = true)]
    pub owner: Option<String>,

    /// The repository name
    #[arg(short, long, global = true)]
    pub repo: Option<String>,

    /// The name of the tag
    #[arg(short, long, global = true)]
    pub tag: Option<String>,

    /// The release id
    #[arg(long, global = true)]
    pub release_id: Option<u64>,

    /// Commitish value for the tag. Unused if the tag already exists
    #[arg(short = 'c', long, global = true)]
    pub commitish: Option<String>,

    /// The name of the release
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    /// Text describing the contents of the tag
    #[arg(short, long, global = true)]
    pub body: Option<String>,

    /// `true` makes the release a draft, `false` publishes it
    #[arg(short, long, global = true)]
    #[arg(num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = parse_flag)]
    pub draft: Option<bool>,

    /// `true` marks the release as a prerelease, `false` as a full release
    #[arg(short, long, global = true)]
    #[arg(num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = parse_flag)]
    pub prerelease: Option<bool>,

    /// Config file providing owner, repo and base_url
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More output, repeat for even more
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create or update a release and upload files to it
    Upload {
        /// Files to attach to the release
        files: Vec<PathBuf>,
    },
    /// Delete a release, or only the assets matching the given patterns
    Delete {
        /// Glob patterns of asset names to delete
        patterns: Vec<String>,
    },
    /// List the releases of the repository
    List,
}

/// Anything but `false` (in any case) turns the flag on.
fn parse_flag(value: &str) -> Result<bool, String> {
    Ok(!value.eq_ignore_ascii_case("false"))
}

impl Cli {
    pub fn tag(&self) -> Option<Tag> {
        self.tag.as_deref().map(Tag::new)
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            owner: self.owner.to_owned(),
            repo: self.repo.to_owned(),
            base_url: self.base_url.to_owned(),
            token: self.token.to_owned(),
        }
    }

    pub fn release_fields(&self) -> ReleaseFields {
        ReleaseFields {
            tag: self.tag(),
            target_commitish: self.commitish.to_owned(),
            name: self.name.to_owned(),
            body: self.body.to_owned(),
            draft: self.draft,
            prerelease: self.prerelease,
        }
    }
}
