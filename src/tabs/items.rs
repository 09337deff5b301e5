//! Items tab: character, item type, subtype.

use super::{TabContext, character_level};
use crate::engine::{GroupBuilder, GroupLevel, RowPopulator, SiblingOrder};
use crate::host::{RowContent, RowKind};
use crate::model::{Entity, ItemQuality, tags};

pub(super) fn builder<'c>(ctx: &TabContext<'c>) -> GroupBuilder<'c> {
    GroupBuilder::new(vec![
        character_level(ctx.characters),
        GroupLevel::by_tag("type", tags::TYPE)
            .ordered(SiblingOrder::priority_or_alphabetical(&ctx.ordering.item_types)),
        GroupLevel::by_tag("subtype", tags::SUBTYPE),
    ])
}

/// Item rows: stack size and quality colour.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemRows;

impl RowPopulator for ItemRows {
    fn row_kind(&self) -> RowKind {
        RowKind::Item
    }

    fn populate(&self, entity: &Entity) -> RowContent {
        let detail = if entity.quantity > 1 {
            format!("x{}", entity.quantity)
        } else {
            String::new()
        };
        let quality = entity.quality.unwrap_or_default();

        let mut tooltip = vec![entity.name.clone(), format!("{quality:?}")];
        if let Some(location) = entity.tag(tags::LOCATION) {
            tooltip.push(location.to_string());
        }
        tooltip.push(format!("Count: {}", entity.quantity));

        RowContent {
            title: entity.name.clone(),
            detail,
            icon: entity.icon.clone(),
            dimmed: entity.quantity == 0 || quality == ItemQuality::Poor,
            quality: Some(quality),
            tooltip,
            ..RowContent::default()
        }
    }
}
