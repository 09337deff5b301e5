//! Currency tab: character, expansion, category.

use super::{TabContext, character_level};
use crate::engine::{GroupBuilder, GroupLevel, RowPopulator, SiblingOrder, WrapRule};
use crate::host::{RowAccent, RowContent, RowKind};
use crate::model::{Entity, tags};

pub(super) fn builder<'c>(ctx: &TabContext<'c>) -> GroupBuilder<'c> {
    let ordering = ctx.ordering;
    let mut category = GroupLevel::by_tag("category", tags::CATEGORY)
        .ordered(SiblingOrder::priority_or_alphabetical(
            &ordering.currency_categories,
        ));
    if let Some(season) = &ordering.current_season {
        category = category.wrap(WrapRule::new(
            season.as_str(),
            "season",
            ordering.current_season_label.as_str(),
        ));
    }

    GroupBuilder::new(vec![
        character_level(ctx.characters),
        GroupLevel::by_tag("header", tags::EXPANSION)
            .ordered(SiblingOrder::priority_or_alphabetical(&ordering.expansions)),
        category,
    ])
}

/// Currency rows: amount against cap.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyRows;

impl RowPopulator for CurrencyRows {
    fn row_kind(&self) -> RowKind {
        RowKind::Currency
    }

    fn populate(&self, entity: &Entity) -> RowContent {
        let (detail, progress) = match entity.max_quantity.filter(|max| *max > 0) {
            Some(max) => (
                format!("{} / {}", entity.quantity, max),
                Some((entity.quantity as f64 / max as f64).clamp(0.0, 1.0)),
            ),
            None => (entity.quantity.to_string(), None),
        };

        let mut tooltip = vec![entity.name.clone(), format!("Amount: {}", entity.quantity)];
        if let Some(max) = entity.max_quantity {
            tooltip.push(format!("Cap: {max}"));
        }

        RowContent {
            title: entity.name.clone(),
            detail,
            icon: entity.icon.clone(),
            dimmed: entity.quantity == 0,
            quality: entity.quality,
            progress,
            accent: if entity.is_capped() {
                RowAccent::Capped
            } else {
                RowAccent::None
            },
            tooltip,
        }
    }
}
