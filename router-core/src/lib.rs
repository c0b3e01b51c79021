//! Router simulation core.
//!
//! Runtime-agnostic building blocks for the topology-discovery and
//! forwarding protocol:
//! - Sparse symmetric adjacency, the distance-vector routing table (`table`)
//! - Shortest-path search over that table (`path`)
//! - Peer-identity-to-outbound-slot lookup (`neighbours`)
//! - The three inter-router message kinds (`message`)
//! - The long-lived router actor that ties them together (`agent`)
//! - Decorative address-label generation (`address`)
//! - Typed, locally-absorbed protocol anomalies (`error`)
//!
//! Nothing here touches a specific async runtime: agents communicate
//! exclusively through `flume` channels, whose async API is executor
//! agnostic, so this crate can be driven by `compio`, `tokio`, or a plain
//! `futures::executor::block_on` in tests.

#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]

pub mod address;
pub mod agent;
pub mod error;
pub mod message;
pub mod neighbours;
pub mod path;
pub mod table;
pub mod types;

pub mod prelude {
    pub use crate::address;
    pub use crate::agent::RouterAgent;
    pub use crate::error::RoutingAnomaly;
    pub use crate::message::{Envelope, NeighbourUpdate, Payload, RouterMessage, TopologyUpdate};
    pub use crate::neighbours::NeighbourMap;
    pub use crate::path::shortest_path;
    pub use crate::table::RoutingTable;
    pub use crate::types::{ChannelId, RouterId, Slot};
}
