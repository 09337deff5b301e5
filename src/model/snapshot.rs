//! Cached inventory snapshots and the data source seam.

use super::entity::{Entity, EntityKind};
use crate::error::{ErrorContext, Result, SnapshotErrorKind, VaultError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Snapshot format version this build reads.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A character known to the scanner cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// `Name-Realm`
    pub key: String,
    pub name: String,
    pub realm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// The character currently logged in
    #[serde(default)]
    pub online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

impl Character {
    pub fn new(name: impl Into<String>, realm: impl Into<String>) -> Self {
        let name = name.into();
        let realm = realm.into();
        Self {
            key: format!("{name}-{realm}"),
            name,
            realm,
            class: None,
            online: false,
            last_seen: None,
        }
    }

    #[must_use]
    pub const fn online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }
}

/// Which slice of the snapshot a tab reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Per-character bags and bank
    Items,
    Currencies,
    Reputations,
    /// Account-wide storage (warband bank and friends)
    Storage,
}

/// Read-only access to scanned inventory data.
///
/// The returned entities are valid for one render pass.
pub trait DataSource {
    /// Entities for a scope, in scanner order.
    fn entities(&self, scope: Scope) -> Vec<Entity>;

    /// All known characters.
    fn characters(&self) -> &[Character];

    /// Look up a character by key.
    fn character(&self, key: &str) -> Option<&Character> {
        self.characters().iter().find(|c| c.key == key)
    }
}

/// A full scanner cache export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    pub characters: Vec<Character>,
    pub items: Vec<Entity>,
    pub currencies: Vec<Entity>,
    pub reputations: Vec<Entity>,
    pub storage: Vec<Entity>,
}

impl Snapshot {
    /// Create an empty snapshot at the current format version.
    pub fn new() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            ..Self::default()
        }
    }

    /// Load and validate a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| VaultError::io(path, e))?;
        Self::from_json(&content).with_context(|| format!("at {}", path.display()))
    }

    /// Parse and validate a snapshot from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check structural invariants the engine relies on.
    ///
    /// Duplicate characters and duplicate `(owner, kind, id)` entities are
    /// rejected. Entities owned by unknown characters are kept: they still
    /// group under their owner key.
    pub fn validate(&self) -> Result<()> {
        if self.version > SNAPSHOT_VERSION {
            return Err(VaultError::snapshot(
                "version check",
                SnapshotErrorKind::UnsupportedVersion {
                    version: self.version,
                    supported: SNAPSHOT_VERSION,
                },
            ));
        }

        let mut keys = HashSet::new();
        for character in &self.characters {
            if !keys.insert(character.key.as_str()) {
                return Err(VaultError::snapshot(
                    "character list",
                    SnapshotErrorKind::DuplicateCharacter(character.key.clone()),
                ));
            }
        }

        let mut seen: HashSet<(Option<&str>, EntityKind, u64, &str)> = HashSet::new();
        let lists = [
            ("items", &self.items),
            ("currencies", &self.currencies),
            ("reputations", &self.reputations),
            ("storage", &self.storage),
        ];
        for (list, entities) in lists {
            for entity in entities {
                if let Some(owner) = entity.owner.as_deref()
                    && !keys.contains(owner)
                {
                    tracing::warn!(
                        "{} entity {} references unknown character '{}'",
                        list,
                        entity.id,
                        owner
                    );
                }
                if !seen.insert((entity.owner.as_deref(), entity.kind, entity.id, list)) {
                    return Err(VaultError::snapshot(
                        format!("{list} list"),
                        SnapshotErrorKind::DuplicateEntity {
                            kind: entity.kind.to_string(),
                            id: entity.id,
                            owner: entity.owner.clone().unwrap_or_default(),
                        },
                    ));
                }
            }
        }
        Ok(())
    }

    /// Total number of entities across all scopes.
    pub fn entity_count(&self) -> usize {
        self.items.len() + self.currencies.len() + self.reputations.len() + self.storage.len()
    }
}

impl DataSource for Snapshot {
    fn entities(&self, scope: Scope) -> Vec<Entity> {
        match scope {
            Scope::Items => self.items.clone(),
            Scope::Currencies => self.currencies.clone(),
            Scope::Reputations => self.reputations.clone(),
            Scope::Storage => self.storage.clone(),
        }
    }

    fn characters(&self) -> &[Character] {
        &self.characters
    }
}
