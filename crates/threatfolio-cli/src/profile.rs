//! Biography pages shown before the analysis tab.

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::util;

const DEFAULT_PROFILE: &str = include_str!("../assets/profile.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Dashboard title.
    pub title: String,
    pub pages: Vec<ProfilePage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePage {
    pub title: String,
    pub sections: Vec<ProfileSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSection {
    pub heading: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

impl Profile {
    /// Reads the profile at `path`, or the built-in one when `path` is `None`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => util::read_json_file("profile", path),
            None => Self::builtin(),
        }
    }

    pub fn builtin() -> anyhow::Result<Self> {
        serde_json::from_str(DEFAULT_PROFILE).context("Failed to parse built-in profile")
    }
}
