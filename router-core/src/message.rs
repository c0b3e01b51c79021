//! Inter-router message types (C4).
//!
//! All three variants are plain value types: a router never mutates a
//! received message in place, it builds a new value (incremented hops,
//! extended path) and re-emits that.

use bytes::Bytes;
use uuid::Uuid;

use crate::types::{ChannelId, RouterId};

/// Application-layer payload carried by an [`Envelope`].
///
/// A tagged enum rather than a universal blob: the harness only ever
/// injects one of these two shapes, and routers treat the payload as
/// opaque regardless of which one it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Used by the traffic-injection harness to tag envelopes for the
    /// min/max/total-hops aggregation.
    Probe(u32),
    /// An opaque forwarded blob.
    Bytes(Bytes),
}

/// Application-layer message routed hop by hop toward `dest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub dest: RouterId,
    pub hops: u32,
    pub payload: Payload,
}

impl Envelope {
    #[must_use]
    pub fn new(dest: RouterId, payload: Payload) -> Self {
        Self {
            dest,
            hops: 0,
            payload,
        }
    }

    /// Build the envelope forwarded to the next hop: same destination and
    /// payload, hop count incremented by one.
    #[must_use]
    pub fn forwarded(&self) -> Self {
        Self {
            dest: self.dest,
            hops: self.hops + 1,
            payload: self.payload.clone(),
        }
    }
}

/// Topology-discovery gossip message. `path` records every router the
/// update has visited so far, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyUpdate {
    pub id: Uuid,
    pub origin: String,
    pub path: Vec<RouterId>,
}

impl TopologyUpdate {
    /// A freshly originated update: new discovery wave id, path containing
    /// only the originator.
    #[must_use]
    pub fn originate(origin: impl Into<String>, self_id: RouterId) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin: origin.into(),
            path: vec![self_id],
        }
    }

    /// The value re-broadcast after a router appends itself to the path.
    #[must_use]
    pub fn extended(&self, next: RouterId) -> Self {
        let mut path = self.path.clone();
        path.push(next);
        Self {
            id: self.id,
            origin: self.origin.clone(),
            path,
        }
    }

    #[must_use]
    pub fn contains(&self, router: RouterId) -> bool {
        self.path.contains(&router)
    }
}

/// Identity handshake: tells a peer which outbound slot reaches `from`, by
/// naming the stable [`ChannelId`] of the sender's inbound endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighbourUpdate {
    pub from: RouterId,
    pub channel: ChannelId,
}

/// Everything that can arrive on a router's inbound channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterMessage {
    Envelope(Envelope),
    TopologyUpdate(TopologyUpdate),
    NeighbourUpdate(NeighbourUpdate),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> RouterId {
        RouterId::new(n)
    }

    #[test]
    fn envelope_forward_increments_hops_and_keeps_payload() {
        let e = Envelope::new(id(3), Payload::Probe(7));
        let next = e.forwarded();
        assert_eq!(next.hops, 1);
        assert_eq!(next.dest, id(3));
        assert_eq!(next.payload, Payload::Probe(7));
    }

    #[test]
    fn topology_update_originate_has_single_hop_path() {
        let u = TopologyUpdate::originate("10.0.0.1/30", id(0));
        assert_eq!(u.path, vec![id(0)]);
    }

    #[test]
    fn topology_update_extended_appends_and_keeps_id() {
        let u = TopologyUpdate::originate("addr", id(0));
        let extended = u.extended(id(1));
        assert_eq!(extended.id, u.id);
        assert_eq!(extended.path, vec![id(0), id(1)]);
    }

    #[test]
    fn contains_detects_cycle_candidates() {
        let mut u = TopologyUpdate::originate("addr", id(0));
        u = u.extended(id(1));
        assert!(u.contains(id(0)));
        assert!(!u.contains(id(2)));
    }
}
