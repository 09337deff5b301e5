//! Storage tab: account-wide storage by location, then item type.
//!
//! There is no character level; storage entities have no owner.

use super::TabContext;
use crate::engine::{GroupBuilder, GroupLevel, SiblingOrder};
use crate::model::tags;

pub(super) fn builder<'c>(ctx: &TabContext<'c>) -> GroupBuilder<'c> {
    let ordering = ctx.ordering;
    GroupBuilder::new(vec![
        GroupLevel::by_tag("location", tags::LOCATION).ordered(
            SiblingOrder::priority_or_alphabetical(&ordering.storage_locations),
        ),
        GroupLevel::by_tag("type", tags::TYPE)
            .ordered(SiblingOrder::priority_or_alphabetical(&ordering.item_types))
            .expanded_when(|_| false),
    ])
}
