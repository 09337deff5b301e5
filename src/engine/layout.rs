//! Vertical layout accumulation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Node kinds with their own vertical increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Row,
    Header,
}

/// Fixed layout increments, in integer layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Offset of the first node
    pub top_padding: u32,
    pub row_height: u32,
    pub row_spacing: u32,
    pub header_height: u32,
    pub header_spacing: u32,
    /// Extra space before a wrapper sub-group
    pub section_gap: u32,
    /// Horizontal indent per depth level
    pub indent_width: u32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            top_padding: 10,
            row_height: 20,
            row_spacing: 2,
            header_height: 24,
            header_spacing: 4,
            section_gap: 8,
            indent_width: 12,
        }
    }
}

impl LayoutMetrics {
    /// One terminal line per node, no padding.
    pub const fn terminal() -> Self {
        Self {
            top_padding: 0,
            row_height: 1,
            row_spacing: 0,
            header_height: 1,
            header_spacing: 0,
            section_gap: 0,
            indent_width: 2,
        }
    }

    /// Distance the cursor moves past a node of `kind`.
    pub const fn increment(&self, kind: NodeKind) -> u32 {
        match kind {
            NodeKind::Row => self.row_height.saturating_add(self.row_spacing),
            NodeKind::Header => self.header_height.saturating_add(self.header_spacing),
        }
    }

    pub const fn indent(&self, depth: usize) -> u32 {
        self.indent_width.saturating_mul(depth as u32)
    }
}

/// Running vertical offset for one render pass.
///
/// Each node is placed at the current offset. The cursor only moves past a
/// node once another node is placed after it, so after a full walk the
/// offset is where the last emitted node starts; that value is reported as
/// the content height.
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    metrics: LayoutMetrics,
    offset: u32,
    pending: u32,
    placed: usize,
}

impl LayoutCursor {
    pub const fn new(metrics: LayoutMetrics) -> Self {
        Self {
            metrics,
            offset: metrics.top_padding,
            pending: 0,
            placed: 0,
        }
    }

    /// Move the cursor down by `amount` and return the new offset.
    pub const fn advance(&mut self, amount: u32) -> u32 {
        self.offset = self.offset.saturating_add(amount);
        self.offset
    }

    /// Reserve the slot for a node of `kind` and return its offset.
    pub const fn place(&mut self, kind: NodeKind) -> u32 {
        if self.placed > 0 {
            let pending = self.pending;
            self.advance(pending);
        }
        self.pending = self.metrics.increment(kind);
        self.placed += 1;
        self.offset
    }

    /// Add a section gap before the next node.
    ///
    /// Has no effect at the top of the pass.
    pub const fn gap(&mut self) {
        if self.placed > 0 {
            self.pending = self.pending.saturating_add(self.metrics.section_gap);
        }
    }

    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Number of nodes placed so far.
    pub const fn placed(&self) -> usize {
        self.placed
    }

    /// Final offset, used to size the scroll container.
    pub const fn content_height(&self) -> u32 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> LayoutMetrics {
        LayoutMetrics {
            top_padding: 5,
            row_height: 10,
            row_spacing: 1,
            header_height: 20,
            header_spacing: 2,
            section_gap: 7,
            indent_width: 4,
        }
    }

    #[test]
    fn test_starts_at_top_padding() {
        let cursor = LayoutCursor::new(metrics());
        assert_eq!(cursor.offset(), 5);
        assert_eq!(cursor.content_height(), 5);
    }

    #[test]
    fn test_place_sequence() {
        let mut cursor = LayoutCursor::new(metrics());
        assert_eq!(cursor.place(NodeKind::Header), 5);
        assert_eq!(cursor.place(NodeKind::Row), 27);
        assert_eq!(cursor.place(NodeKind::Row), 38);
        assert_eq!(cursor.place(NodeKind::Header), 49);
        assert_eq!(cursor.content_height(), 49);
        assert_eq!(cursor.placed(), 4);
    }

    #[test]
    fn test_gap_only_between_nodes() {
        let mut cursor = LayoutCursor::new(metrics());
        cursor.gap();
        assert_eq!(cursor.place(NodeKind::Header), 5);
        cursor.gap();
        assert_eq!(cursor.place(NodeKind::Header), 5 + 22 + 7);
    }

    #[test]
    fn test_advance_returns_new_offset() {
        let mut cursor = LayoutCursor::new(metrics());
        assert_eq!(cursor.advance(3), 8);
        assert_eq!(cursor.advance(0), 8);
    }

    #[test]
    fn test_indent() {
        assert_eq!(metrics().indent(0), 0);
        assert_eq!(metrics().indent(3), 12);
    }
}
