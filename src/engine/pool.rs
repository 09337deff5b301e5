//! Recyclable row widgets.
//!
//! Rows are expensive for a host to construct, so every render pass first
//! releases the previous pass's rows back into per-kind idle stacks and
//! then acquires from them. Headers and messages are not pooled; they are
//! infrequent and their content varies too much to reuse profitably.

use crate::host::{RowKind, WidgetHost, WidgetId};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Idle,
    Active { parent: WidgetId },
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    kind: RowKind,
    state: SlotState,
}

/// Per-kind pool counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Rows ever constructed for this kind
    pub constructed: usize,
    pub idle: usize,
    pub active: usize,
}

/// Pool of reusable rows, keyed by [`RowKind`].
///
/// Every tracked row is either idle in the pool or active under exactly one
/// container. Acquiring pops from the idle stack of the requested kind, so a
/// row is never handed out while a previous consumer still holds it.
#[derive(Debug, Default)]
pub struct WidgetPool {
    slots: HashMap<WidgetId, Slot>,
    idle: HashMap<RowKind, Vec<WidgetId>>,
    constructed: HashMap<RowKind, usize>,
}

impl WidgetPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take an idle row of `kind`, constructing one if none is idle.
    ///
    /// The row is marked active under `parent`; attaching it there is the
    /// caller's job.
    pub fn acquire<F>(&mut self, kind: RowKind, parent: WidgetId, construct: F) -> WidgetId
    where
        F: FnOnce() -> WidgetId,
    {
        let id = match self.idle.get_mut(&kind).and_then(Vec::pop) {
            Some(id) => id,
            None => {
                let id = construct();
                *self.constructed.entry(kind).or_default() += 1;
                if self.slots.contains_key(&id) {
                    tracing::warn!("host returned already pooled widget {} as new", id);
                    self.forget_idle(id);
                }
                id
            }
        };
        self.slots.insert(
            id,
            Slot {
                kind,
                state: SlotState::Active { parent },
            },
        );
        id
    }

    /// Return an active row to the idle set.
    ///
    /// Bindings and content are reset and the row is hidden and detached.
    /// Releasing an unknown widget or an already idle row does nothing.
    /// Returns whether the row was released.
    pub fn release<H>(&mut self, host: &mut H, id: WidgetId) -> bool
    where
        H: WidgetHost + ?Sized,
    {
        let Some(slot) = self.slots.get_mut(&id) else {
            return false;
        };
        if slot.state == SlotState::Idle {
            return false;
        }
        slot.state = SlotState::Idle;
        let kind = slot.kind;

        host.clear_bindings(id);
        host.reset_content(id);
        host.set_visible(id, false);
        host.detach(id);
        self.idle.entry(kind).or_default().push(id);
        true
    }

    /// Clear `container` for a full redraw.
    ///
    /// Pooled rows found among its children are released; any other child
    /// is discarded. Rows the pool still considers active under the
    /// container are released even if the host no longer lists them.
    pub fn release_all<H>(&mut self, host: &mut H, container: WidgetId) -> usize
    where
        H: WidgetHost + ?Sized,
    {
        let mut released = 0;
        for child in host.children(container) {
            if self.slots.contains_key(&child) {
                if self.release(host, child) {
                    released += 1;
                }
            } else {
                host.discard(child);
            }
        }

        let mut stragglers: Vec<WidgetId> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.state == SlotState::Active { parent: container })
            .map(|(id, _)| *id)
            .collect();
        stragglers.sort_unstable();
        for id in stragglers {
            if self.release(host, id) {
                released += 1;
            }
        }
        released
    }

    /// Whether `id` is a row this pool manages.
    pub fn is_pooled(&self, id: WidgetId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Whether `id` is currently handed out.
    pub fn is_active(&self, id: WidgetId) -> bool {
        self.slots
            .get(&id)
            .is_some_and(|slot| matches!(slot.state, SlotState::Active { .. }))
    }

    pub fn stats(&self, kind: RowKind) -> PoolStats {
        let idle = self.idle.get(&kind).map_or(0, Vec::len);
        let active = self
            .slots
            .values()
            .filter(|s| s.kind == kind && matches!(s.state, SlotState::Active { .. }))
            .count();
        PoolStats {
            constructed: self.constructed.get(&kind).copied().unwrap_or(0),
            idle,
            active,
        }
    }

    fn forget_idle(&mut self, id: WidgetId) {
        for stack in self.idle.values_mut() {
            stack.retain(|idle| *idle != id);
        }
    }
}
