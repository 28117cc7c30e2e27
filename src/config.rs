//! Team configuration stored as JSON next to where the tool is run.

use crate::color::{BaseColor, ColorMapper, Normalization, ZeroPolicy};
use crate::error::{GrassError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "teamgrass.json";
pub const DEFAULT_TITLE: &str = "Team Grass Tracker";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Author pattern matched against commit name/email; also the member's id.
    pub key: String,
    pub display_name: String,
    pub color: BaseColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    pub title: String,
    pub repository: Option<PathBuf>,
    pub members: Vec<Member>,
    pub zero_policy: ZeroPolicy,
    pub normalization: Normalization,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            repository: None,
            members: Vec::new(),
            zero_policy: ZeroPolicy::default(),
            normalization: Normalization::default(),
        }
    }
}

impl TeamConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| GrassError::Config(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn mapper(&self) -> ColorMapper {
        ColorMapper::new(self.zero_policy)
    }

    pub fn member(&self, key: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.key == key)
    }

    pub fn add_member(&mut self, key: &str, display_name: Option<&str>, color: Option<BaseColor>) -> Result<&Member> {
        let key = key.trim();
        if key.is_empty() {
            return Err(GrassError::Config("member key must not be empty".into()));
        }
        if self.member(key).is_some() {
            return Err(GrassError::Config(format!("member '{key}' already exists")));
        }
        self.members.push(Member {
            key: key.to_string(),
            display_name: display_name.unwrap_or(key).to_string(),
            color: color.unwrap_or_else(|| default_color(key)),
        });
        Ok(&self.members[self.members.len() - 1])
    }

    pub fn update_color(&mut self, key: &str, color: BaseColor) -> Result<()> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.key == key)
            .ok_or_else(|| GrassError::Config(format!("no member '{key}'")))?;
        member.color = color;
        Ok(())
    }

    pub fn remove_member(&mut self, key: &str) -> Result<Member> {
        let idx = self
            .members
            .iter()
            .position(|m| m.key == key)
            .ok_or_else(|| GrassError::Config(format!("no member '{key}'")))?;
        Ok(self.members.remove(idx))
    }

    pub fn set_repository(&mut self, path: PathBuf) {
        self.repository = Some(path);
    }
}

/// Stable hue picked from the member key (FNV-1a), so re-adding a member keeps its color.
pub fn default_color(key: &str) -> BaseColor {
    let hash = key
        .bytes()
        .fold(0xcbf29ce484222325u64, |h, b| (h ^ b as u64).wrapping_mul(0x100000001b3));
    BaseColor::Hue((hash % 360) as f64)
}
