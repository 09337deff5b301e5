//! Persistent expanded/collapsed state for group nodes.

use super::search::MatchSet;
use crate::error::{Result, StateErrorKind, VaultError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Storage behind the expansion store.
///
/// Absence of a flag means "use the node's default".
pub trait ExpansionBackend: std::fmt::Debug {
    fn get_flag(&self, key: &str) -> Option<bool>;

    fn set_flag(&mut self, key: &str, expanded: bool);

    /// Persist pending changes. In-memory backends have nothing to do.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Flags held for the lifetime of the process only.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    flags: HashMap<String, bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExpansionBackend for MemoryBackend {
    fn get_flag(&self, key: &str) -> Option<bool> {
        self.flags.get(key).copied()
    }

    fn set_flag(&mut self, key: &str, expanded: bool) {
        self.flags.insert(key.to_string(), expanded);
    }
}

/// On-disk layout of the state file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    flags: BTreeMap<String, bool>,
}

/// Flags saved as JSON in the user's config directory.
///
/// Stale keys for nodes that no longer exist are kept; they are harmless.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
    state: StateFile,
    dirty: bool,
}

impl JsonFileBackend {
    /// Default state file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vaultview").join("expansion.json"))
    }

    /// Open the state file at `path`; a missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            let content =
                std::fs::read_to_string(&path).map_err(|e| VaultError::io(&path, e))?;
            serde_json::from_str(&content).map_err(|e| {
                VaultError::state(
                    format!("reading {}", path.display()),
                    StateErrorKind::Malformed(e.to_string()),
                )
            })?
        } else {
            StateFile::default()
        };
        Ok(Self {
            path,
            state,
            dirty: false,
        })
    }

    /// Open the state file, falling back to an empty state on any error.
    pub fn open_or_default(path: &Path) -> Self {
        Self::open(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load expansion state: {}", e);
            Self {
                path: path.to_path_buf(),
                state: StateFile::default(),
                dirty: false,
            }
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored flags.
    pub fn len(&self) -> usize {
        self.state.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.flags.is_empty()
    }
}

impl ExpansionBackend for JsonFileBackend {
    fn get_flag(&self, key: &str) -> Option<bool> {
        self.state.flags.get(key).copied()
    }

    fn set_flag(&mut self, key: &str, expanded: bool) {
        if self.state.flags.insert(key.to_string(), expanded) != Some(expanded) {
            self.dirty = true;
        }
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| VaultError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(&self.state).map_err(|e| {
            VaultError::state("serializing flags", StateErrorKind::Malformed(e.to_string()))
        })?;
        std::fs::write(&self.path, json).map_err(|e| VaultError::io(&self.path, e))?;
        self.dirty = false;
        Ok(())
    }
}

/// Expanded/collapsed flags keyed by group node key.
///
/// Stored values always win over a node's default. Search can force a
/// node open for display, but never writes that back.
#[derive(Debug)]
pub struct ExpansionStore {
    backend: Box<dyn ExpansionBackend>,
    render_requested: bool,
}

impl Default for ExpansionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl ExpansionStore {
    pub fn new(backend: Box<dyn ExpansionBackend>) -> Self {
        Self {
            backend,
            render_requested: false,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    /// Stored value for `key`, or `default` if nothing is stored.
    pub fn is_expanded(&self, key: &str, default: bool) -> bool {
        self.backend.get_flag(key).unwrap_or(default)
    }

    /// Store a value and ask the owning view to re-render.
    pub fn set_expanded(&mut self, key: &str, expanded: bool) {
        self.backend.set_flag(key, expanded);
        self.render_requested = true;
    }

    /// Flip the stored-or-default value and return the new value.
    ///
    /// While a search is active the result is remembered but not visible,
    /// since matching groups are forced open.
    pub fn toggle(&mut self, key: &str, default: bool) -> bool {
        let expanded = !self.is_expanded(key, default);
        self.set_expanded(key, expanded);
        expanded
    }

    /// Expansion as displayed: forced open when a search is active and the
    /// group contains a match, otherwise the stored-or-default value.
    pub fn force_expand_if_searching(&self, key: &str, default: bool, matches: &MatchSet) -> bool {
        if matches.is_active() && matches.contains(key) {
            return true;
        }
        self.is_expanded(key, default)
    }

    /// Consume a pending re-render request.
    pub const fn take_render_request(&mut self) -> bool {
        let requested = self.render_requested;
        self.render_requested = false;
        requested
    }

    /// Persist pending changes.
    pub fn flush(&mut self) -> Result<()> {
        self.backend.flush()
    }
}
