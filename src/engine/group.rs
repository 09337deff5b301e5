//! Multi-level grouping of entities into a tree of collapsible nodes.
//!
//! A [`GroupBuilder`] holds an ordered list of [`GroupLevel`]s, e.g. "by
//! character", "by expansion", "by category". Building partitions the
//! entities left to right into a strictly nested tree whose nodes borrow
//! the entities. Trees are cheap and rebuilt on every render pass.

use crate::model::Entity;
use indexmap::IndexMap;
use std::cmp::Ordering;

/// Label of the catch-all bucket for unlisted or missing values.
pub const OTHER_LABEL: &str = "Other";

/// Key value of the catch-all bucket.
pub const OTHER_VALUE: &str = "other";

type Classifier<'f> = Box<dyn Fn(&Entity) -> Option<String> + 'f>;
type Labeler<'f> = Box<dyn Fn(&str) -> String + 'f>;
type DefaultExpanded<'f> = Box<dyn Fn(&str) -> bool + 'f>;

/// How sibling groups are ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiblingOrder {
    /// Listed values first, in list order; everything else is merged into
    /// the catch-all bucket at the end.
    Priority(Vec<String>),
    /// Case-insensitive by label; missing values go to the catch-all bucket.
    Alphabetical,
}

impl SiblingOrder {
    /// Priority order from a list, or alphabetical if the list is empty.
    pub fn priority_or_alphabetical(list: &[String]) -> Self {
        if list.is_empty() {
            Self::Alphabetical
        } else {
            Self::Priority(list.to_vec())
        }
    }
}

/// How leaves inside a group are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeafOrder {
    /// Case-insensitive by name, then by id
    #[default]
    ByName,
    /// As supplied by the data source
    Source,
}

/// Wrap the group for one classification value in an extra layer.
///
/// The wrapped group is always placed last among its siblings, one level
/// deeper than them, under a synthetic collapsible header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapRule {
    /// Classification value to wrap (case-insensitive)
    pub value: String,
    /// Key segment of the wrapper node
    pub segment: String,
    /// Label of the wrapper node
    pub label: String,
}

impl WrapRule {
    pub fn new(
        value: impl Into<String>,
        segment: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            segment: segment.into(),
            label: label.into(),
        }
    }
}

/// One classification step of the grouping chain.
pub struct GroupLevel<'f> {
    segment: Option<String>,
    classify: Classifier<'f>,
    label: Labeler<'f>,
    default_expanded: DefaultExpanded<'f>,
    order: SiblingOrder,
    wrap: Option<WrapRule>,
}

impl std::fmt::Debug for GroupLevel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupLevel")
            .field("segment", &self.segment)
            .field("order", &self.order)
            .field("wrap", &self.wrap)
            .finish_non_exhaustive()
    }
}

impl<'f> GroupLevel<'f> {
    /// A level whose node keys read `<parent>-<segment>-<value>`.
    pub fn new<F>(segment: impl Into<String>, classify: F) -> Self
    where
        F: Fn(&Entity) -> Option<String> + 'f,
    {
        Self {
            segment: Some(segment.into()),
            ..Self::unkeyed(classify)
        }
    }

    /// A level whose node keys are just `<parent>-<value>` (or `<value>` at
    /// the top), e.g. character keys.
    pub fn unkeyed<F>(classify: F) -> Self
    where
        F: Fn(&Entity) -> Option<String> + 'f,
    {
        Self {
            segment: None,
            classify: Box::new(classify),
            label: Box::new(|value: &str| value.to_string()),
            default_expanded: Box::new(|_| true),
            order: SiblingOrder::Alphabetical,
            wrap: None,
        }
    }

    /// A keyed level classifying by a tag value.
    pub fn by_tag(segment: impl Into<String>, tag: &'f str) -> Self {
        Self::new(segment, move |e: &Entity| e.tag(tag).map(str::to_string))
    }

    /// Map classification values to display labels.
    #[must_use]
    pub fn labelled<F>(mut self, label: F) -> Self
    where
        F: Fn(&str) -> String + 'f,
    {
        self.label = Box::new(label);
        self
    }

    /// Decide each group's default expansion from its value.
    #[must_use]
    pub fn expanded_when<F>(mut self, default_expanded: F) -> Self
    where
        F: Fn(&str) -> bool + 'f,
    {
        self.default_expanded = Box::new(default_expanded);
        self
    }

    #[must_use]
    pub fn ordered(mut self, order: SiblingOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn wrap(mut self, rule: WrapRule) -> Self {
        self.wrap = Some(rule);
        self
    }

    fn child_key(&self, parent: &str, value: &str) -> String {
        join_key(parent, self.segment.as_deref(), value)
    }

    fn label_for(&self, value: &str) -> String {
        if value == OTHER_VALUE {
            OTHER_LABEL.to_string()
        } else {
            (self.label)(value)
        }
    }
}

/// Children of a group node: either more groups or entities, never both.
#[derive(Debug, Clone)]
pub enum GroupChildren<'a> {
    Groups(Vec<GroupNode<'a>>),
    Leaves(Vec<&'a Entity>),
}

/// A synthetic tree node built fresh for each render pass.
#[derive(Debug, Clone)]
pub struct GroupNode<'a> {
    /// Stable key derived from the ancestor chain and this node's value
    pub key: String,
    pub label: String,
    pub default_expanded: bool,
    /// Extra wrapper layer rather than a classification value
    pub synthetic: bool,
    pub children: GroupChildren<'a>,
}

impl<'a> GroupNode<'a> {
    /// The root node returned by [`GroupBuilder::build`]. Never rendered.
    pub const fn root(children: GroupChildren<'a>) -> Self {
        Self {
            key: String::new(),
            label: String::new(),
            default_expanded: true,
            synthetic: false,
            children,
        }
    }

    pub fn is_root(&self) -> bool {
        self.key.is_empty()
    }

    /// Number of entities in this subtree.
    pub fn leaf_count(&self) -> usize {
        match &self.children {
            GroupChildren::Groups(groups) => groups.iter().map(Self::leaf_count).sum(),
            GroupChildren::Leaves(leaves) => leaves.len(),
        }
    }

    /// Entities in this subtree, depth-first in sibling order.
    pub fn leaves(&self) -> Vec<&'a Entity> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<&'a Entity>) {
        match &self.children {
            GroupChildren::Groups(groups) => {
                for group in groups {
                    group.collect_leaves(out);
                }
            }
            GroupChildren::Leaves(leaves) => out.extend(leaves.iter().copied()),
        }
    }

    /// Visit every group node (not the root) depth-first with its depth.
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&GroupNode<'a>, usize),
    {
        self.walk_at(0, visit);
    }

    fn walk_at<F>(&self, depth: usize, visit: &mut F)
    where
        F: FnMut(&GroupNode<'a>, usize),
    {
        let child_depth = if self.is_root() {
            depth
        } else {
            visit(self, depth);
            depth + 1
        };
        if let GroupChildren::Groups(groups) = &self.children {
            for group in groups {
                group.walk_at(child_depth, visit);
            }
        }
    }

    /// Keys of every group node, depth-first.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.walk(&mut |node, _| keys.push(node.key.clone()));
        keys
    }

    /// Find a group node by key.
    pub fn find(&self, key: &str) -> Option<&GroupNode<'a>> {
        if self.key == key {
            return Some(self);
        }
        match &self.children {
            GroupChildren::Groups(groups) => groups.iter().find_map(|g| g.find(key)),
            GroupChildren::Leaves(_) => None,
        }
    }
}

/// Builds a [`GroupNode`] tree from a flat entity list.
#[derive(Debug, Default)]
pub struct GroupBuilder<'f> {
    levels: Vec<GroupLevel<'f>>,
    leaf_order: LeafOrder,
}

impl<'f> GroupBuilder<'f> {
    pub fn new(levels: Vec<GroupLevel<'f>>) -> Self {
        Self {
            levels,
            leaf_order: LeafOrder::default(),
        }
    }

    #[must_use]
    pub fn level(mut self, level: GroupLevel<'f>) -> Self {
        self.levels.push(level);
        self
    }

    #[must_use]
    pub const fn leaf_order(mut self, order: LeafOrder) -> Self {
        self.leaf_order = order;
        self
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Partition `entities` into a tree. Every entity lands in exactly one
    /// leaf position.
    pub fn build<'a>(&self, entities: &'a [Entity]) -> GroupNode<'a> {
        GroupNode::root(self.build_level("", entities.iter().collect(), 0))
    }

    /// Like [`build`](Self::build), keeping only entities for which `keep`
    /// holds. Groups left without entities are not created.
    pub fn build_filtered<'a, P>(&self, entities: &'a [Entity], keep: P) -> GroupNode<'a>
    where
        P: Fn(&Entity) -> bool,
    {
        let kept: Vec<&'a Entity> = entities.iter().filter(|e| keep(e)).collect();
        GroupNode::root(self.build_level("", kept, 0))
    }

    fn build_level<'a>(
        &self,
        parent_key: &str,
        mut entities: Vec<&'a Entity>,
        depth: usize,
    ) -> GroupChildren<'a> {
        let Some(level) = self.levels.get(depth) else {
            if self.leaf_order == LeafOrder::ByName {
                entities.sort_by(|a, b| compare_labels(&a.name, &b.name).then(a.id.cmp(&b.id)));
            }
            return GroupChildren::Leaves(entities);
        };

        let mut buckets: IndexMap<String, Vec<&'a Entity>> = IndexMap::new();
        for entity in entities {
            let value = bucket_value(level, (level.classify)(entity));
            buckets.entry(value).or_default().push(entity);
        }

        let wrapped = level.wrap.as_ref().and_then(|rule| {
            let value = buckets
                .keys()
                .find(|v| v.eq_ignore_ascii_case(&rule.value))?
                .clone();
            let members = buckets.shift_remove(&value)?;
            Some((rule, value, members))
        });

        let mut ordered: Vec<(String, Vec<&'a Entity>)> = buckets.into_iter().collect();
        sort_buckets(level, &mut ordered);

        let mut groups: Vec<GroupNode<'a>> = ordered
            .into_iter()
            .map(|(value, members)| self.group_node(level, parent_key, &value, members, depth))
            .collect();

        if let Some((rule, value, members)) = wrapped {
            let wrapper_key = join_key(parent_key, None, &rule.segment);
            let inner = self.group_node(level, &wrapper_key, &value, members, depth);
            groups.push(GroupNode {
                default_expanded: (level.default_expanded)(&value),
                key: wrapper_key,
                label: rule.label.clone(),
                synthetic: true,
                children: GroupChildren::Groups(vec![inner]),
            });
        }

        GroupChildren::Groups(groups)
    }

    fn group_node<'a>(
        &self,
        level: &GroupLevel<'f>,
        parent_key: &str,
        value: &str,
        members: Vec<&'a Entity>,
        depth: usize,
    ) -> GroupNode<'a> {
        let key = level.child_key(parent_key, value);
        let children = self.build_level(&key, members, depth + 1);
        GroupNode {
            label: level.label_for(value),
            default_expanded: (level.default_expanded)(value),
            synthetic: false,
            children,
            key,
        }
    }
}

/// Bucket a classification value, folding unlisted and missing values into
/// the catch-all bucket.
fn bucket_value(level: &GroupLevel<'_>, value: Option<String>) -> String {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return OTHER_VALUE.to_string();
    };
    if value.eq_ignore_ascii_case(OTHER_LABEL) {
        return OTHER_VALUE.to_string();
    }
    match &level.order {
        SiblingOrder::Priority(list) => {
            if list.iter().any(|v| v == &value)
                || level
                    .wrap
                    .as_ref()
                    .is_some_and(|w| w.value.eq_ignore_ascii_case(&value))
            {
                value
            } else {
                OTHER_VALUE.to_string()
            }
        }
        SiblingOrder::Alphabetical => value,
    }
}

fn sort_buckets<T>(level: &GroupLevel<'_>, buckets: &mut [(String, T)]) {
    match &level.order {
        SiblingOrder::Priority(list) => {
            let rank = |value: &str| {
                if value == OTHER_VALUE {
                    usize::MAX
                } else {
                    list.iter().position(|v| v == value).unwrap_or(usize::MAX - 1)
                }
            };
            buckets.sort_by_key(|(value, _)| rank(value));
        }
        SiblingOrder::Alphabetical => {
            buckets.sort_by(|(a, _), (b, _)| {
                let other_a = a == OTHER_VALUE;
                let other_b = b == OTHER_VALUE;
                other_a
                    .cmp(&other_b)
                    .then_with(|| compare_labels(&level.label_for(a), &level.label_for(b)))
                    .then_with(|| a.cmp(b))
            });
        }
    }
}

/// Case-insensitive label order with a case-sensitive tie-break.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn join_key(parent: &str, segment: Option<&str>, value: &str) -> String {
    let mut key = String::with_capacity(parent.len() + value.len() + 16);
    for part in [Some(parent), segment, Some(value)].into_iter().flatten() {
        if part.is_empty() {
            continue;
        }
        if !key.is_empty() {
            key.push('-');
        }
        key.push_str(part);
    }
    key
}
