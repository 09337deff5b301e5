//! Reputation tab: character, expansion, faction header.

use super::{TabContext, character_level};
use crate::engine::{GroupBuilder, GroupLevel, RowPopulator, SiblingOrder};
use crate::host::{RowAccent, RowContent, RowKind};
use crate::model::{Entity, tags};

pub(super) fn builder<'c>(ctx: &TabContext<'c>) -> GroupBuilder<'c> {
    GroupBuilder::new(vec![
        character_level(ctx.characters),
        GroupLevel::by_tag("header", tags::EXPANSION)
            .ordered(SiblingOrder::priority_or_alphabetical(&ctx.ordering.expansions)),
        GroupLevel::by_tag("faction", tags::HEADER),
    ])
}

/// Reputation rows: standing, renown or paragon progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReputationRows;

impl RowPopulator for ReputationRows {
    fn row_kind(&self) -> RowKind {
        RowKind::Reputation
    }

    fn populate(&self, entity: &Entity) -> RowContent {
        let Some(progress) = entity.reputation else {
            return RowContent {
                title: entity.name.clone(),
                detail: "Unknown".to_string(),
                icon: entity.icon.clone(),
                dimmed: true,
                tooltip: vec![entity.name.clone()],
                ..RowContent::default()
            };
        };

        let label = progress.progress_label();
        let accent = match progress.paragon {
            Some(paragon) if paragon.reward_pending => RowAccent::Reward,
            _ if progress.is_base_maxed() => RowAccent::Complete,
            _ => RowAccent::None,
        };

        RowContent {
            title: entity.name.clone(),
            tooltip: vec![entity.name.clone(), label.clone()],
            detail: label,
            icon: entity.icon.clone(),
            dimmed: false,
            quality: None,
            progress: Some(progress.progress_fraction()),
            accent,
        }
    }
}
