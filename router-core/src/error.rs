//! Protocol anomaly classification (§7).
//!
//! Nothing in this crate propagates an error across a channel — channels
//! carry [`crate::message::RouterMessage`] values only. This type exists so
//! the agent's main loop can log a consistent, typed reason when it absorbs
//! an anomaly locally instead of scattering ad-hoc strings through
//! `tracing` calls.

use thiserror::Error;

use crate::types::{ChannelId, RouterId};

/// A protocol anomaly the agent encountered and recovered from locally.
///
/// None of these are fatal: the agent logs the anomaly (via `tracing::warn!`
/// at the call site) and continues its main loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingAnomaly {
    /// A `NeighbourUpdate` carried a channel id that matches none of this
    /// agent's outbound slots.
    #[error("neighbour update for unknown channel {0:?}")]
    UnknownChannel(ChannelId),

    /// An envelope's next hop resolved via path search but the neighbour map
    /// has no slot for it; treated as "path unknown" per §4.5.
    #[error("no outbound slot known for next hop {0}")]
    UnresolvedNextHop(RouterId),

    /// `shortest_path` returned an empty sequence for a destination that is
    /// not the agent itself.
    #[error("no known path to {0}")]
    PathUnknown(RouterId),

    /// The agent has zero outbound neighbours and cannot forward or
    /// provoke discovery.
    #[error("agent has no outbound neighbours, envelope for {0} dropped")]
    NoNeighbours(RouterId),
}
