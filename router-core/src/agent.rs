//! Router Agent (C5): the long-lived actor that performs topology discovery
//! and envelope forwarding (§4.5).
//!
//! Concurrency strategy (§5): every outbound slot is a `flume` channel sized
//! by the harness to at least the node's degree before any agent starts, so
//! the two startup broadcasts (`NeighbourUpdate` + `TopologyUpdate` on every
//! slot) and subsequent forwards never block waiting for a peer to drain its
//! inbound queue. This is the "buffered channels" option from §5 rather than
//! the ephemeral-task-per-send option — one fewer moving part, and capacity
//! is cheap at simulation scale.

use hashbrown::HashSet;

use flume::{Receiver, Sender};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, warn};

use crate::address;
use crate::error::RoutingAnomaly;
use crate::message::{Envelope, NeighbourUpdate, RouterMessage, TopologyUpdate};
use crate::neighbours::NeighbourMap;
use crate::path::shortest_path;
use crate::table::RoutingTable;
use crate::types::{ChannelId, RouterId, Slot};

/// One positional outbound neighbour: the stable id of the channel reaching
/// it (for matching `NeighbourUpdate`s) and the sender half itself.
struct OutboundSlot {
    channel: ChannelId,
    tx: Sender<RouterMessage>,
}

/// A single simulated router. Owns all of its mutable state exclusively;
/// the only way in or out is `inbound`, `outbound` and `sink`.
pub struct RouterAgent {
    id: RouterId,
    own_channel: ChannelId,
    address: String,
    inbound: Receiver<RouterMessage>,
    outbound: Vec<OutboundSlot>,
    sink: Sender<Envelope>,
    table: RoutingTable,
    neighbours: NeighbourMap,
    rng: StdRng,
}

impl RouterAgent {
    /// Build a new agent. `outbound` is positional: slot `i` is this node's
    /// `i`-th neighbour, named here only by the stable [`ChannelId`] of its
    /// inbound endpoint — the agent does not learn *who* is on the other
    /// end of a slot until a `NeighbourUpdate` names it (§4.4).
    #[must_use]
    pub fn new(
        id: RouterId,
        own_channel: ChannelId,
        inbound: Receiver<RouterMessage>,
        outbound: Vec<(ChannelId, Sender<RouterMessage>)>,
        sink: Sender<Envelope>,
        mut rng: StdRng,
    ) -> Self {
        let address = address::generate(&mut rng, outbound.len());
        let outbound = outbound
            .into_iter()
            .map(|(channel, tx)| OutboundSlot { channel, tx })
            .collect();
        Self {
            id,
            own_channel,
            address,
            inbound,
            outbound,
            sink,
            table: RoutingTable::new(),
            neighbours: NeighbourMap::new(),
            rng,
        }
    }

    #[must_use]
    pub fn id(&self) -> RouterId {
        self.id
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    #[must_use]
    pub fn neighbours(&self) -> &NeighbourMap {
        &self.neighbours
    }

    /// Run startup, then the main receive loop, until the inbound channel
    /// closes (all senders dropped — the harness tearing down at the end of
    /// a run). There is no other terminal state (§4.5 state machine).
    pub async fn run(mut self) {
        self.startup().await;
        debug!(router = %self.id, address = %self.address, "entering Running state");
        while let Ok(msg) = self.inbound.recv_async().await {
            self.dispatch(msg).await;
        }
        debug!(router = %self.id, "inbound channel closed, agent stopping");
    }

    /// One-shot startup broadcast (§4.5): a `NeighbourUpdate` and a fresh
    /// `TopologyUpdate` on every outbound slot. A node with zero neighbours
    /// emits nothing and simply parks on its inbound channel.
    async fn startup(&mut self) {
        for slot in &self.outbound {
            let neighbour_update = RouterMessage::NeighbourUpdate(NeighbourUpdate {
                from: self.id,
                channel: self.own_channel,
            });
            if slot.tx.send_async(neighbour_update).await.is_err() {
                warn!(router = %self.id, "outbound slot closed during startup neighbour broadcast");
            }

            let topology_update = RouterMessage::TopologyUpdate(TopologyUpdate::originate(
                self.address.clone(),
                self.id,
            ));
            if slot.tx.send_async(topology_update).await.is_err() {
                warn!(router = %self.id, "outbound slot closed during startup topology broadcast");
            }
        }
    }

    async fn dispatch(&mut self, msg: RouterMessage) {
        match msg {
            RouterMessage::NeighbourUpdate(update) => self.handle_neighbour_update(update),
            RouterMessage::TopologyUpdate(update) => self.handle_topology_update(update).await,
            RouterMessage::Envelope(envelope) => self.handle_envelope(envelope).await,
        }
    }

    /// Correlate a peer identity with one of our outbound slots by matching
    /// the channel id it claims against the ones we were wired with (§4.5).
    fn handle_neighbour_update(&mut self, update: NeighbourUpdate) {
        match self
            .outbound
            .iter()
            .position(|slot| slot.channel == update.channel)
        {
            Some(index) => self.neighbours.associate(update.from, Slot::new(index)),
            None => {
                let anomaly = RoutingAnomaly::UnknownChannel(update.channel);
                warn!(router = %self.id, %anomaly, "dropping neighbour update");
            }
        }
    }

    /// Merge the path into the routing table, then re-broadcast to every
    /// not-yet-visited neighbour, or suppress if this agent already visited
    /// the update or has nothing left to forward to (§4.5).
    async fn handle_topology_update(&mut self, update: TopologyUpdate) {
        match update.path.as_slice() {
            [] => return,
            [only] => self.table.put_edge(self.id, *only, 1),
            path => {
                for pair in path.windows(2) {
                    self.table.put_edge(pair[0], pair[1], 1);
                }
            }
        }

        if update.contains(self.id) {
            return;
        }

        let extended = update.extended(self.id);
        let visited: HashSet<RouterId> = extended.path.iter().copied().collect();
        let forward_slots = self.neighbours.slots_excluding(&visited);
        if forward_slots.is_empty() {
            return;
        }

        for slot in forward_slots {
            if let Some(out) = self.outbound.get(slot.get()) {
                let msg = RouterMessage::TopologyUpdate(extended.clone());
                let _ = out.tx.send_async(msg).await;
            }
        }
    }

    /// Deliver to the framework sink if we are the destination, otherwise
    /// forward a step closer and fall back to random-neighbour-plus-
    /// discovery when the destination is not yet known (§4.5).
    async fn handle_envelope(&mut self, envelope: Envelope) {
        if envelope.dest == self.id {
            if self.sink.send_async(envelope).await.is_err() {
                warn!(router = %self.id, "framework sink closed, dropping terminated envelope");
            }
            return;
        }

        let forwarded = envelope.forwarded();
        let path = shortest_path(&self.table, self.id, envelope.dest);

        if path.len() >= 2 {
            let next_hop = path[1];
            if let Some(slot) = self.neighbours.index_of(next_hop) {
                if let Some(out) = self.outbound.get(slot.get()) {
                    let _ = out
                        .tx
                        .send_async(RouterMessage::Envelope(forwarded))
                        .await;
                    return;
                }
            }
            let anomaly = RoutingAnomaly::UnresolvedNextHop(next_hop);
            warn!(router = %self.id, %anomaly, "falling back to random forward");
        } else {
            let anomaly = RoutingAnomaly::PathUnknown(envelope.dest);
            debug!(router = %self.id, %anomaly, "falling back to random forward");
        }

        self.forward_randomly_and_provoke_discovery(forwarded).await;
    }

    /// Pick a neighbour slot uniformly at random to carry the stranded
    /// envelope, and nudge discovery along by originating a fresh
    /// `TopologyUpdate` on another random slot (§4.5).
    async fn forward_randomly_and_provoke_discovery(&mut self, envelope: Envelope) {
        if self.outbound.is_empty() {
            let anomaly = RoutingAnomaly::NoNeighbours(envelope.dest);
            warn!(router = %self.id, %anomaly, "dropping envelope");
            return;
        }

        let forward_index = self.rng.gen_range(0..self.outbound.len());
        let _ = self.outbound[forward_index]
            .tx
            .send_async(RouterMessage::Envelope(envelope))
            .await;

        let discovery_index = self.rng.gen_range(0..self.outbound.len());
        let discovery = TopologyUpdate::originate(self.address.clone(), self.id);
        let _ = self.outbound[discovery_index]
            .tx
            .send_async(RouterMessage::TopologyUpdate(discovery))
            .await;
    }
}
