//! Harness (C6): builds the template, wires channels, spawns one agent per
//! node, injects traffic, and aggregates the results (§2, §6).

use std::collections::HashSet;
use std::time::Duration;

use hashbrown::HashMap;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use thiserror::Error;

use router_core::agent::RouterAgent;
use router_core::message::{Envelope, Payload, RouterMessage};
use router_core::types::{ChannelId, RouterId};

use crate::cli::{Cli, TopologyKind, TrafficMode};
use crate::topology::{self, Template};

/// The only fatal error class (§7): configuration mistakes caught before
/// any agent is spawned.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("topology has {size} nodes, exceeding the 1024-node guard (use --force to override)")]
    Oversize { size: usize },
    #[error("Mesh topology requires size >= 1 and dimension >= 1")]
    InvalidMeshParameters,
}

/// An overall wall-clock ceiling on the aggregate test (§5, "individual
/// agents do not time out" — this applies only to the harness's collection
/// loop). Not exposed on the CLI; the spec leaves its value to the
/// implementer.
const COLLECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Channel capacity for every outbound slot, sized so startup's two
/// broadcasts per neighbour never block even when every node starts at
/// once (§5's "buffered channels" strategy).
fn channel_capacity(degree: usize) -> usize {
    (degree.max(1) * 4).max(16)
}

/// One observed delivery on the framework sink.
#[derive(Debug, Clone, Copy)]
pub struct Delivery {
    pub payload_key: u32,
    pub hops: u32,
}

/// Aggregate outcome of one harness run.
#[derive(Debug, Default)]
pub struct Report {
    pub matrix: Option<String>,
    pub deliveries: Vec<Delivery>,
    /// Count of distinct payload keys observed, i.e. `by_key.len()` —
    /// duplicate terminated envelopes for the same key (tolerated per §4.5's
    /// failure semantics) are not counted twice here, unlike `deliveries`.
    pub num_messages: usize,
    pub min_hops: Option<u32>,
    pub max_hops: Option<u32>,
    pub total_hops: u32,
    pub timed_out: bool,
}

fn build_template(cli: &Cli) -> Result<Template, ConfigError> {
    match cli.topology {
        TopologyKind::Line => Ok(topology::line(cli.size)),
        TopologyKind::Ring => Ok(topology::ring(cli.size)),
        TopologyKind::Star => Ok(topology::star(cli.size)),
        TopologyKind::FullyConnected => Ok(topology::fully_connected(cli.size)),
        TopologyKind::Mesh => {
            if cli.size == 0 || cli.dimension == 0 {
                return Err(ConfigError::InvalidMeshParameters);
            }
            Ok(topology::mesh(cli.size, cli.dimension))
        }
    }
}

fn validate_size(node_count: usize, force: bool) -> Result<(), ConfigError> {
    if node_count > 1024 && !force {
        return Err(ConfigError::Oversize { size: node_count });
    }
    Ok(())
}

/// Build the template and validate configuration without spawning anything.
/// Split out from [`run`] so the oversize/Mesh-parameter guard rejects bad
/// input at the harness boundary before any agent exists (§7).
pub fn prepare(cli: &Cli) -> Result<Template, ConfigError> {
    let template = build_template(cli)?;
    validate_size(template.node_count(), cli.force)?;
    Ok(template)
}

/// Spawn one agent per node of `template`, inject traffic per `cli.mode`,
/// and collect deliveries from the framework sink.
pub async fn run(cli: &Cli, template: &Template) -> Report {
    let n = template.node_count();
    let mut matrix = None;
    if cli.print_matrix {
        matrix = Some(crate::matrix::render(template));
    }
    if n == 0 {
        return Report {
            matrix,
            ..Report::default()
        };
    }

    let mut inbound_txs = Vec::with_capacity(n);
    let mut inbound_rxs = Vec::with_capacity(n);
    for node in template.nodes() {
        let capacity = channel_capacity(template.degree(node));
        let (tx, rx) = flume::bounded::<RouterMessage>(capacity);
        inbound_txs.push(tx);
        inbound_rxs.push(Some(rx));
    }

    let (sink_tx, sink_rx) = flume::unbounded::<Envelope>();

    let mut seed_rng = StdRng::seed_from_u64(0xC0FFEE_u64 ^ n as u64);
    let mut handles = Vec::with_capacity(n);
    for node in template.nodes() {
        let idx = node.get() as usize;
        let outbound: Vec<(ChannelId, flume::Sender<RouterMessage>)> = template
            .neighbours_of(node)
            .map(|peer| {
                (
                    ChannelId::new(peer.get() as u64),
                    inbound_txs[peer.get() as usize].clone(),
                )
            })
            .collect();

        let inbound = inbound_rxs[idx].take().expect("each rx taken exactly once");
        let agent_rng = StdRng::seed_from_u64(seed_rng.next_u64());
        let agent = RouterAgent::new(
            node,
            ChannelId::new(node.get() as u64),
            inbound,
            outbound,
            sink_tx.clone(),
            agent_rng,
        );
        handles.push(compio::runtime::spawn(agent.run()));
    }
    drop(sink_tx);

    compio::time::sleep(cli.settle_time()).await;

    inject_traffic(cli, &inbound_txs, n);

    let report = collect(sink_rx, n, cli.mode).await;
    Report { matrix, ..report }
}

fn inject_traffic(cli: &Cli, inbound_txs: &[flume::Sender<RouterMessage>], n: usize) {
    match cli.mode {
        TrafficMode::OneToAll => {
            for k in 0..n as u32 {
                let envelope = Envelope::new(RouterId::new(k), Payload::Probe(k));
                let _ = inbound_txs[0].send(RouterMessage::Envelope(envelope));
            }
        }
        TrafficMode::AllToOne => {
            for k in 0..n as u32 {
                let envelope = Envelope::new(RouterId::new(0), Payload::Probe(k));
                let _ = inbound_txs[k as usize].send(RouterMessage::Envelope(envelope));
            }
        }
    }
}

async fn collect(sink_rx: flume::Receiver<Envelope>, n: usize, _mode: TrafficMode) -> Report {
    let mut expected: HashSet<u32> = (0..n as u32).collect();
    let mut deliveries = Vec::new();
    let mut by_key: HashMap<u32, u32> = HashMap::new();
    let mut timed_out = false;

    while !expected.is_empty() {
        match compio::time::timeout(COLLECTION_TIMEOUT, sink_rx.recv_async()).await {
            Ok(Ok(envelope)) => {
                let key = match envelope.payload {
                    Payload::Probe(k) => k,
                    Payload::Bytes(_) => continue,
                };
                expected.remove(&key);
                by_key.entry(key).or_insert(envelope.hops);
                deliveries.push(Delivery {
                    payload_key: key,
                    hops: envelope.hops,
                });
            }
            Ok(Err(_)) => break, // sink closed: every agent exited, nothing more will arrive
            Err(_) => {
                timed_out = true;
                break;
            }
        }
    }

    let hops: Vec<u32> = by_key.values().copied().collect();
    Report {
        matrix: None,
        num_messages: by_key.len(),
        min_hops: hops.iter().min().copied(),
        max_hops: hops.iter().max().copied(),
        total_hops: hops.iter().sum(),
        deliveries,
        timed_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::LogLevel;

    fn cli(topology: TopologyKind, size: usize, mode: TrafficMode) -> Cli {
        Cli {
            topology,
            size,
            dimension: 3,
            print_matrix: false,
            settle_ms: 20,
            mode,
            dropouts: 0,
            repeats: 10,
            force: false,
            log_level: LogLevel::None,
        }
    }

    #[test]
    fn oversize_without_force_is_rejected() {
        let args = cli(TopologyKind::FullyConnected, 2000, TrafficMode::OneToAll);
        let err = prepare(&args).unwrap_err();
        assert!(matches!(err, ConfigError::Oversize { size: 2000 }));
    }

    #[test]
    fn oversize_with_force_is_accepted() {
        let mut args = cli(TopologyKind::Line, 2000, TrafficMode::OneToAll);
        args.force = true;
        assert!(prepare(&args).is_ok());
    }

    #[test]
    fn mesh_with_zero_dimension_is_rejected() {
        let mut args = cli(TopologyKind::Mesh, 2, TrafficMode::OneToAll);
        args.dimension = 0;
        assert!(matches!(
            prepare(&args),
            Err(ConfigError::InvalidMeshParameters)
        ));
    }

    #[compio::test]
    async fn line_three_one_to_all_delivers_every_destination() {
        let args = cli(TopologyKind::Line, 3, TrafficMode::OneToAll);
        let template = prepare(&args).unwrap();
        let report = run(&args, &template).await;

        assert!(!report.timed_out);
        assert_eq!(report.deliveries.len(), 3);
        assert_eq!(report.num_messages, 3);
        assert_eq!(report.min_hops, Some(0));
        assert_eq!(report.max_hops, Some(2));
        assert_eq!(report.total_hops, 3);
    }

    #[compio::test]
    async fn ring_four_all_to_one_bounds_hops_by_diameter() {
        let args = cli(TopologyKind::Ring, 4, TrafficMode::AllToOne);
        let template = prepare(&args).unwrap();
        let report = run(&args, &template).await;

        assert!(!report.timed_out);
        assert_eq!(report.deliveries.len(), 4);
        assert!(report.max_hops.unwrap() <= 2);
    }

    #[compio::test]
    async fn fully_connected_five_one_to_all_max_one_hop() {
        let args = cli(TopologyKind::FullyConnected, 5, TrafficMode::OneToAll);
        let template = prepare(&args).unwrap();
        let report = run(&args, &template).await;

        assert!(!report.timed_out);
        assert_eq!(report.deliveries.len(), 5);
        assert_eq!(report.max_hops, Some(1));
    }

    #[compio::test]
    async fn size_one_topology_delivers_zero_hop_self_envelope() {
        let args = cli(TopologyKind::Line, 1, TrafficMode::OneToAll);
        let template = prepare(&args).unwrap();
        let report = run(&args, &template).await;

        assert_eq!(report.deliveries.len(), 1);
        assert_eq!(report.deliveries[0].hops, 0);
    }
}
