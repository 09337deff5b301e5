//! Inventory data model.
//!
//! Scanners export a [`Snapshot`] of every character's items, currencies and
//! reputations. The engine only ever reads it through the [`DataSource`]
//! trait, so a live game client cache and a JSON export look the same.

mod entity;
mod reputation;
mod snapshot;

pub use entity::{Entity, EntityKind, ItemQuality, tags};
pub use reputation::{MAX_STANDING, Paragon, Renown, ReputationProgress, Standing};
pub use snapshot::{Character, DataSource, SNAPSHOT_VERSION, Scope, Snapshot};
