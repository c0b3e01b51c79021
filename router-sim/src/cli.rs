//! Command-line surface (§6). Not part of the core protocol — the harness
//! translates these flags into a [`crate::topology::Template`] and the
//! arguments [`crate::harness::prepare`] and [`crate::harness::run`] take
//! directly.

use std::time::Duration;

use clap::{Parser, ValueEnum};

/// Named topology a template can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TopologyKind {
    #[value(name = "Line")]
    Line,
    #[value(name = "Ring")]
    Ring,
    #[value(name = "Star")]
    Star,
    #[value(name = "Fully_Connected")]
    FullyConnected,
    #[value(name = "Mesh")]
    Mesh,
}

/// Traffic injection pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TrafficMode {
    #[value(name = "One_To_All")]
    OneToAll,
    #[value(name = "All_To_One")]
    AllToOne,
}

/// Logging verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    #[value(name = "none")]
    None,
    #[value(name = "normal")]
    Normal,
    #[value(name = "verbose")]
    Verbose,
}

/// Distributed router topology-discovery simulation.
#[derive(Debug, Parser)]
#[command(name = "router-sim", version, about)]
pub struct Cli {
    /// Topology to simulate.
    #[arg(short = 't', long, value_enum, default_value_t = TopologyKind::Mesh)]
    pub topology: TopologyKind,

    /// Size parameter (node count for most topologies; base for Mesh).
    #[arg(short = 's', long, default_value_t = 20)]
    pub size: usize,

    /// Dimension parameter, used only by Mesh.
    #[arg(short = 'd', long, default_value_t = 3)]
    pub dimension: u32,

    /// Print the adjacency matrix before running.
    #[arg(short = 'c', long, default_value_t = false)]
    pub print_matrix: bool,

    /// Settle time before injecting traffic, in milliseconds.
    #[arg(short = 'w', long, default_value_t = 100)]
    pub settle_ms: u64,

    /// Traffic injection pattern.
    #[arg(short = 'm', long, value_enum, default_value_t = TrafficMode::OneToAll)]
    pub mode: TrafficMode,

    /// Dropout rate. Accepted for compatibility; unused by the core (§9).
    #[arg(short = 'x', long, default_value_t = 0)]
    pub dropouts: u32,

    /// Repeat count. Accepted for compatibility; unused by the core (§9).
    #[arg(short = 'r', long, default_value_t = 10)]
    pub repeats: u32,

    /// Force large configurations past the 1024-node guard.
    #[arg(short = 'f', long, default_value_t = false)]
    pub force: bool,

    /// Logging verbosity.
    #[arg(short = 'l', long, value_enum, default_value_t = LogLevel::Normal)]
    pub log_level: LogLevel,
}

impl Cli {
    #[must_use]
    pub fn settle_time(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}
