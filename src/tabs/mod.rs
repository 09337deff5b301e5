//! The four built-in tabs.
//!
//! Each tab is a scope of the data source, a chain of grouping levels and
//! a row populator. The structure is shared; canonical orders come from
//! [`OrderingConfig`] because they are game data.

mod currency;
mod items;
mod reputation;
mod storage;

pub use currency::CurrencyRows;
pub use items::ItemRows;
pub use reputation::ReputationRows;

use crate::config::OrderingConfig;
use crate::engine::{GroupBuilder, GroupLevel, RowPopulator};
use crate::host::RowKind;
use crate::model::{Character, Entity, Scope};

/// A tab of the inventory window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabKind {
    #[default]
    Currency,
    Items,
    Storage,
    Reputation,
}

impl TabKind {
    /// All tabs in display order.
    pub const ALL: [Self; 4] = [Self::Currency, Self::Items, Self::Storage, Self::Reputation];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Currency => "Currency",
            Self::Items => "Items",
            Self::Storage => "Storage",
            Self::Reputation => "Reputation",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Currency => "currency",
            Self::Items => "items",
            Self::Storage => "storage",
            Self::Reputation => "reputation",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.name().eq_ignore_ascii_case(name) || tab.title() == name)
    }

    /// Data source slice this tab renders.
    pub const fn scope(self) -> Scope {
        match self {
            Self::Currency => Scope::Currencies,
            Self::Items => Scope::Items,
            Self::Storage => Scope::Storage,
            Self::Reputation => Scope::Reputations,
        }
    }

    pub const fn row_kind(self) -> RowKind {
        match self {
            Self::Currency => RowKind::Currency,
            Self::Items | Self::Storage => RowKind::Item,
            Self::Reputation => RowKind::Reputation,
        }
    }

    /// Next tab, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Grouping chain for this tab.
    pub fn builder<'c>(self, ctx: &TabContext<'c>) -> GroupBuilder<'c> {
        match self {
            Self::Currency => currency::builder(ctx),
            Self::Items => items::builder(ctx),
            Self::Storage => storage::builder(ctx),
            Self::Reputation => reputation::builder(ctx),
        }
    }

    /// Row populator for this tab.
    pub fn populator(self) -> &'static dyn RowPopulator {
        match self {
            Self::Currency => &CurrencyRows,
            Self::Items | Self::Storage => &ItemRows,
            Self::Reputation => &ReputationRows,
        }
    }
}

impl std::fmt::Display for TabKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// What a tab needs to build its grouping chain.
#[derive(Debug, Clone, Copy)]
pub struct TabContext<'c> {
    pub characters: &'c [Character],
    pub ordering: &'c OrderingConfig,
}

/// Top level shared by the per-character tabs.
///
/// Keys are the character key itself. The online character starts
/// expanded, everyone else collapsed.
fn character_level<'c>(characters: &'c [Character]) -> GroupLevel<'c> {
    let find = move |key: &str| characters.iter().find(|c| c.key == key);
    GroupLevel::unkeyed(|e: &Entity| e.owner.clone())
        .labelled(move |key| find(key).map_or_else(|| key.to_string(), |c| c.name.clone()))
        .expanded_when(move |key| find(key).is_some_and(|c| c.online))
}
