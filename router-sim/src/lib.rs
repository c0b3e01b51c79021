//! # router-sim
//!
//! Harness (C6) for the distributed router topology-discovery simulation.
//!
//! This crate builds the template adjacency list for a named topology
//! (Line, Ring, Star, Fully Connected, Mesh), wires per-node channels,
//! spawns one [`router_core::agent::RouterAgent`] per node, injects
//! application traffic, and aggregates delivery results from the framework
//! sink. The hard part — topology discovery and forwarding — lives in
//! `router-core`; this crate is purely the external collaborator the core
//! consumes (§1, §6).
//!
//! ## Layout
//!
//! - [`topology`] — template builders for the five named topologies.
//! - [`matrix`] — adjacency-matrix pretty-printer (`-c`).
//! - [`cli`] — the `clap` argument surface.
//! - [`harness`] — channel wiring, traffic injection, result aggregation.
//! - [`logging`] — `tracing-subscriber` init keyed off `-l`.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::future_not_send)] // Runtime-agnostic design, driven by `compio` here.

pub mod cli;
pub mod harness;
pub mod logging;
pub mod matrix;
pub mod topology;
