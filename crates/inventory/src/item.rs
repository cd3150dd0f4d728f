use serde::{Deserialize, Serialize};

use loadout_core::{DomainError, DomainResult, Entity, ItemId};

use crate::stats::{self, Stats, parse_stats};

/// A catalog item. Immutable once created.
///
/// Only `id` is required when decoding; a saved item with a missing name is
/// kept with an empty one rather than dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "stats::deserialize_lenient")]
    stats: Stats,
}

impl Item {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Draft of an item that has not been assigned an id yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub stats: Stats,
}

impl NewItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    /// Build a draft from raw form input, parsing `stats_text` as `key=value` pairs.
    pub fn from_form(
        name: &str,
        icon: Option<&str>,
        description: Option<&str>,
        stats_text: Option<&str>,
    ) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.map(str::to_string),
            description: description.map(str::to_string),
            stats: stats_text.map(parse_stats).unwrap_or_default(),
        }
    }

    /// Fails when the name is blank.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(())
    }

    /// Validate and turn the draft into an item with the given id.
    ///
    /// The name is trimmed; blank icon/description become absent.
    pub fn into_item(self, id: ItemId) -> DomainResult<Item> {
        self.validate()?;
        Ok(Item {
            id,
            name: self.name.trim().to_string(),
            icon: non_blank(self.icon),
            description: non_blank(self.description),
            stats: self.stats,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
