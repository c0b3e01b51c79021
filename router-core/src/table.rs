//! Routing table (C1): a sparse, symmetric, monotonically-growing adjacency.
//!
//! Entries are never removed. A weight of zero is treated identically to
//! absence by every consumer in this crate.

use hashbrown::HashMap;

use crate::types::RouterId;

/// Per-agent view of known links, `RouterId -> (RouterId -> weight)`.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    rows: HashMap<RouterId, HashMap<RouterId, u32>>,
}

impl RoutingTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }

    /// Insert or overwrite the edge weight for `i -> j`. Callers are expected
    /// to call this in symmetric pairs; `put` itself only ever touches one
    /// direction.
    pub fn put(&mut self, i: RouterId, j: RouterId, weight: u32) {
        self.rows.entry(i).or_default().insert(j, weight);
    }

    /// Insert the symmetric pair `a <-> b` with the given weight in one call.
    pub fn put_edge(&mut self, a: RouterId, b: RouterId, weight: u32) {
        self.put(a, b, weight);
        self.put(b, a, weight);
    }

    /// Outgoing edges from `i`, or `None` if `i` is unknown.
    #[must_use]
    pub fn row(&self, i: RouterId) -> Option<&HashMap<RouterId, u32>> {
        self.rows.get(&i)
    }

    /// Weight of the edge `i -> j`, treating absence and zero identically.
    #[must_use]
    pub fn weight(&self, i: RouterId, j: RouterId) -> Option<u32> {
        self.row(i).and_then(|row| row.get(&j)).copied().filter(|w| *w != 0)
    }

    #[must_use]
    pub fn contains(&self, i: RouterId) -> bool {
        self.rows.contains_key(&i)
    }
}
