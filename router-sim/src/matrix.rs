//! Adjacency-matrix pretty-printer (`-c` flag, §6).

use std::fmt::Write as _;

use router_core::types::RouterId;

use crate::topology::Template;

/// Render `template` as an `N x N` grid of `0`/`1`, one row per line.
#[must_use]
pub fn render(template: &Template) -> String {
    let n = template.node_count();
    let mut out = String::with_capacity(n * (n * 2 + 1));
    for i in 0..n {
        let row_id = RouterId::new(i as u32);
        let neighbours: std::collections::HashSet<RouterId> =
            template.neighbours_of(row_id).collect();
        for j in 0..n {
            let bit = if neighbours.contains(&RouterId::new(j as u32)) {
                '1'
            } else {
                '0'
            };
            let _ = write!(out, "{bit}");
            if j + 1 < n {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}
