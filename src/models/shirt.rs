//! Shirt catalog data models.
//!
//! - `ShirtRecord`: a stored shirt, as returned by the shirt store
//! - `NewShirt`: the write payload; the store assigns `id` and `created_at`
//! - `ShirtMetadata`, `KitType`: the optional descriptive bundle

use std::{fmt, str::FromStr};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name stored when the uploader has none.
pub const UNKNOWN_USER: &str = "Unknown User";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum KitType {
    Home,
    Away,
    Third,
    Goalkeeper,
    Special,
}

impl KitType {
    pub const ALL: [KitType; 5] = [
        KitType::Home,
        KitType::Away,
        KitType::Third,
        KitType::Goalkeeper,
        KitType::Special,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KitType::Home => "home",
            KitType::Away => "away",
            KitType::Third => "third",
            KitType::Goalkeeper => "goalkeeper",
            KitType::Special => "special",
        }
    }

    /// Label shown in filter pickers.
    pub fn display_name(&self) -> &'static str {
        match self {
            KitType::Home => "Home",
            KitType::Away => "Away",
            KitType::Third => "Third",
            KitType::Goalkeeper => "Goalkeeper",
            KitType::Special => "Special Edition",
        }
    }
}

impl fmt::Display for KitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KitType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(KitType::Home),
            "away" => Ok(KitType::Away),
            "third" => Ok(KitType::Third),
            "goalkeeper" => Ok(KitType::Goalkeeper),
            "special" => Ok(KitType::Special),
            other => Err(anyhow!("unknown kit type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShirtMetadata {
    pub team: Option<String>,
    pub league: Option<String>,
    pub season: Option<String>,
    pub kit_type: Option<KitType>,
}

impl ShirtMetadata {
    /// Trims text fields and drops the blank ones.
    pub fn normalized(self) -> Self {
        Self {
            team: non_blank(self.team),
            league: non_blank(self.league),
            season: non_blank(self.season),
            kit_type: self.kit_type,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShirtRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub back_image_url: Option<String>,
    pub label_image_url: Option<String>,
    pub user_id: String,
    pub user_display_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub metadata: ShirtMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewShirt {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub back_image_url: Option<String>,
    pub label_image_url: Option<String>,
    pub user_id: String,
    pub user_display_name: String,
    #[serde(flatten)]
    pub metadata: ShirtMetadata,
}

impl NewShirt {
    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> ShirtRecord {
        ShirtRecord {
            id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            back_image_url: self.back_image_url,
            label_image_url: self.label_image_url,
            user_id: self.user_id,
            user_display_name: self.user_display_name,
            created_at,
            metadata: self.metadata,
        }
    }
}

/// User-entered fields of an upload form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShirtDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub metadata: ShirtMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kit_type_parses_case_insensitively() {
        assert_eq!("Home".parse::<KitType>().unwrap(), KitType::Home);
        assert_eq!(" goalkeeper ".parse::<KitType>().unwrap(), KitType::Goalkeeper);
        assert!("fourth".parse::<KitType>().is_err());
    }

    #[test]
    fn kit_type_serializes_lowercase() {
        let json = serde_json::to_string(&KitType::Special).unwrap();
        assert_eq!(json, "\"special\"");
        assert_eq!(KitType::Special.display_name(), "Special Edition");
    }

    #[test]
    fn metadata_normalization_drops_blank_fields() {
        let meta = ShirtMetadata {
            team: Some("  Arsenal ".into()),
            league: Some("   ".into()),
            season: Some(String::new()),
            kit_type: Some(KitType::Away),
        }
        .normalized();

        assert_eq!(meta.team.as_deref(), Some("Arsenal"));
        assert_eq!(meta.league, None);
        assert_eq!(meta.season, None);
        assert_eq!(meta.kit_type, Some(KitType::Away));
    }

    #[test]
    fn record_serializes_metadata_inline() {
        let record = NewShirt {
            name: "Arsenal Home".into(),
            description: String::new(),
            image_url: "file:///a.jpg".into(),
            back_image_url: None,
            label_image_url: None,
            user_id: "u1".into(),
            user_display_name: "Sam".into(),
            metadata: ShirtMetadata {
                team: Some("Arsenal".into()),
                kit_type: Some(KitType::Home),
                ..Default::default()
            },
        }
        .into_record("s1".into(), Utc::now());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["team"], "Arsenal");
        assert_eq!(value["kitType"], "home");
        assert_eq!(value["userDisplayName"], "Sam");
    }
}
