//! Search query matching and tree annotation.

use super::group::{GroupChildren, GroupNode};
use crate::model::{Entity, tags};
use std::collections::{HashMap, HashSet};

/// A normalized search query.
///
/// Surrounding whitespace is ignored and matching is case-insensitive, so
/// a query of only whitespace is treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.trim().to_lowercase();
        Self { raw, needle }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// The query as typed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The trimmed query, as shown in the "no results" message.
    pub fn display(&self) -> &str {
        self.raw.trim()
    }

    /// The lowercased needle used for matching.
    pub fn needle(&self) -> &str {
        &self.needle
    }
}

impl From<&str> for SearchQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Entity predicate for a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    /// Also match against the category tag
    pub match_category: bool,
    /// Tag consulted when `match_category` is set
    pub category_tag: String,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            match_category: false,
            category_tag: tags::CATEGORY.to_string(),
        }
    }
}

impl SearchFilter {
    pub fn new(match_category: bool, category_tag: impl Into<String>) -> Self {
        Self {
            match_category,
            category_tag: category_tag.into(),
        }
    }

    /// Whether `entity` matches `query`. An empty query matches everything.
    pub fn matches(&self, entity: &Entity, query: &SearchQuery) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.needle();
        if entity.name.to_lowercase().contains(needle) {
            return true;
        }
        self.match_category
            && entity
                .tag(&self.category_tag)
                .is_some_and(|c| c.to_lowercase().contains(needle))
    }

    /// Collect every group key that has at least one matching leaf below it.
    ///
    /// An empty query yields an inactive set, under which every group is
    /// visible and nothing is forced open.
    pub fn annotate_tree(&self, root: &GroupNode<'_>, query: &SearchQuery) -> MatchSet {
        if query.is_empty() {
            return MatchSet::inactive();
        }
        let mut set = MatchSet {
            active: true,
            ..MatchSet::default()
        };
        set.total = self.annotate(root, query, &mut set);
        set
    }

    fn annotate(&self, node: &GroupNode<'_>, query: &SearchQuery, set: &mut MatchSet) -> usize {
        let count = match &node.children {
            GroupChildren::Groups(groups) => groups
                .iter()
                .map(|g| self.annotate(g, query, set))
                .sum(),
            GroupChildren::Leaves(leaves) => {
                leaves.iter().filter(|e| self.matches(e, query)).count()
            }
        };
        if count > 0 && !node.is_root() {
            set.keys.insert(node.key.clone());
            set.counts.insert(node.key.clone(), count);
        }
        count
    }
}

/// Result of annotating a tree for a search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    active: bool,
    keys: HashSet<String>,
    counts: HashMap<String, usize>,
    total: usize,
}

impl MatchSet {
    /// No search in progress.
    pub fn inactive() -> Self {
        Self::default()
    }

    /// An active set containing exactly `keys`, without per-key counts.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: HashSet<String> = keys.into_iter().map(Into::into).collect();
        Self {
            active: true,
            total: keys.len(),
            keys,
            counts: HashMap::new(),
        }
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the group `key` is visible: always while inactive, otherwise
    /// only if it has a matching descendant.
    pub fn contains(&self, key: &str) -> bool {
        !self.active || self.keys.contains(key)
    }

    /// Matching leaves below `key`, if annotated.
    pub fn visible_count(&self, key: &str) -> Option<usize> {
        self.counts.get(key).copied()
    }

    /// Total matching leaves in the tree.
    pub const fn total_matches(&self) -> usize {
        self.total
    }

    /// Whether an active search found nothing.
    pub const fn is_no_results(&self) -> bool {
        self.active && self.total == 0
    }

    /// Number of groups with a match.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::group::{GroupBuilder, GroupLevel};
    use crate::model::EntityKind;

    fn sample() -> Vec<Entity> {
        vec![
            Entity::new(1, "Valorstones", EntityKind::Currency)
                .with_owner("Alice-Realm")
                .with_tag(tags::EXPANSION, "War Within")
                .with_tag(tags::CATEGORY, "Upgrade"),
            Entity::new(2, "Nethershard", EntityKind::Currency)
                .with_owner("Bob-Realm")
                .with_tag(tags::EXPANSION, "Legion")
                .with_tag(tags::CATEGORY, "Legion Invasion"),
        ]
    }

    fn builder<'f>() -> GroupBuilder<'f> {
        GroupBuilder::new(vec![
            GroupLevel::unkeyed(|e: &Entity| e.owner.clone()),
            GroupLevel::by_tag("header", tags::EXPANSION),
        ])
    }

    #[test]
    fn test_query_normalization() {
        let q = SearchQuery::new("  LeGion ");
        assert_eq!(q.needle(), "legion");
        assert_eq!(q.display(), "LeGion");
        assert!(!q.is_empty());
        assert!(SearchQuery::new("   ").is_empty());
        assert!(SearchQuery::empty().is_empty());
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let entities = sample();
        let filter = SearchFilter::default();
        assert!(filter.matches(&entities[0], &"VALOR".into()));
        assert!(!filter.matches(&entities[0], &"nether".into()));
        assert!(filter.matches(&entities[0], &SearchQuery::empty()));
    }

    #[test]
    fn test_category_matching_is_optional() {
        let entities = sample();
        let query = SearchQuery::new("invasion");
        assert!(!SearchFilter::default().matches(&entities[1], &query));
        assert!(SearchFilter::new(true, tags::CATEGORY).matches(&entities[1], &query));
    }

    #[test]
    fn test_annotate_marks_ancestors_of_matches() {
        let entities = sample();
        let root = builder().build(&entities);
        let set = SearchFilter::default().annotate_tree(&root, &"nether".into());

        assert!(set.is_active());
        assert!(set.contains("Bob-Realm"));
        assert!(set.contains("Bob-Realm-header-Legion"));
        assert!(!set.contains("Alice-Realm"));
        assert!(!set.contains("Alice-Realm-header-War Within"));
        assert_eq!(set.visible_count("Bob-Realm"), Some(1));
        assert_eq!(set.total_matches(), 1);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_annotate_empty_query_is_inactive() {
        let entities = sample();
        let root = builder().build(&entities);
        let set = SearchFilter::default().annotate_tree(&root, &"  ".into());
        assert!(!set.is_active());
        assert!(set.contains("Alice-Realm"));
        assert!(!set.is_no_results());
    }

    #[test]
    fn test_annotate_no_results() {
        let entities = sample();
        let root = builder().build(&entities);
        let set = SearchFilter::default().annotate_tree(&root, &"zzz".into());
        assert!(set.is_no_results());
        assert!(set.is_empty());
    }
}
