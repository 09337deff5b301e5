//! Inventory entities: items, currencies and reputations.

use super::reputation::ReputationProgress;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known classification tag names.
///
/// Scanners may attach any tags they like; these are the ones the built-in
/// tabs group by.
pub mod tags {
    /// Expansion the entity belongs to (currencies, reputations)
    pub const EXPANSION: &str = "expansion";
    /// Category within an expansion (currencies) or item class
    pub const CATEGORY: &str = "category";
    /// Item type (Armor, Consumable, Reagent, ...)
    pub const TYPE: &str = "type";
    /// Item subtype (Cloth, Potion, Herb, ...)
    pub const SUBTYPE: &str = "subtype";
    /// Storage location (Bank, Reagent Bank, Warband Bank)
    pub const LOCATION: &str = "location";
    /// Reputation header (faction group)
    pub const HEADER: &str = "header";
}

/// The three inventory domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Item,
    Currency,
    Reputation,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Currency => write!(f, "currency"),
            Self::Reputation => write!(f, "reputation"),
        }
    }
}

/// Item quality tier, used for row colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemQuality {
    Poor,
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Artifact,
    Heirloom,
}

/// An immutable inventory record supplied by a scanner.
///
/// Entities are snapshots: the engine reads them, groups them and renders
/// them, but never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable identifier within its kind (item id, currency id, faction id)
    pub id: u64,
    /// Display name
    pub name: String,
    /// Inventory domain
    pub kind: EntityKind,
    /// Owning character key (`Name-Realm`); `None` for account-wide storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Classification tags used for grouping
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Stack size, currency amount, or reputation value
    #[serde(default)]
    pub quantity: u64,
    /// Currency cap, when the currency has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<u64>,
    /// Icon path or file id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<ItemQuality>,
    /// Standing/renown/paragon data for reputations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation: Option<ReputationProgress>,
}

impl Entity {
    /// Create a new entity with no tags.
    pub fn new(id: u64, name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            owner: None,
            tags: BTreeMap::new(),
            quantity: 0,
            max_quantity: None,
            icon: None,
            quality: None,
            reputation: None,
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub const fn with_quantity(mut self, quantity: u64) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub const fn with_max_quantity(mut self, max: u64) -> Self {
        self.max_quantity = Some(max);
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub const fn with_quality(mut self, quality: ItemQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    #[must_use]
    pub fn with_reputation(mut self, progress: ReputationProgress) -> Self {
        self.reputation = Some(progress);
        self
    }

    /// Value of a classification tag, ignoring empty strings.
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Whether this entity has reached its cap (currencies only).
    pub fn is_capped(&self) -> bool {
        self.max_quantity
            .is_some_and(|max| max > 0 && self.quantity >= max)
    }
}
