//! Shortest-path search (C2) over a [`RoutingTable`].
//!
//! The original implementation explored candidate edges with a recursive,
//! goroutine-per-edge fan-out. Under unit weights that buys nothing over a
//! plain sequential BFS, so that's what this does.

use std::collections::{HashSet, VecDeque};

use hashbrown::HashMap;

use crate::table::RoutingTable;
use crate::types::RouterId;

/// Minimum-hop path from `src` to `dest`, or an empty vec if unreachable or
/// either endpoint is unknown to `table`.
#[must_use]
pub fn shortest_path(table: &RoutingTable, src: RouterId, dest: RouterId) -> Vec<RouterId> {
    if src == dest {
        return vec![src];
    }
    if table.row(src).is_none() || table.row(dest).is_none() {
        return Vec::new();
    }

    let mut visited = HashSet::new();
    let mut prev: HashMap<RouterId, RouterId> = HashMap::new();
    let mut queue = VecDeque::new();

    visited.insert(src);
    queue.push_back(src);

    while let Some(current) = queue.pop_front() {
        if current == dest {
            return reconstruct(&prev, src, dest);
        }

        let Some(row) = table.row(current) else {
            continue;
        };

        for (&neighbour, &weight) in row {
            if weight == 0 || visited.contains(&neighbour) {
                continue;
            }
            visited.insert(neighbour);
            prev.insert(neighbour, current);
            queue.push_back(neighbour);
        }
    }

    Vec::new()
}

fn reconstruct(
    prev: &HashMap<RouterId, RouterId>,
    src: RouterId,
    dest: RouterId,
) -> Vec<RouterId> {
    let mut path = vec![dest];
    let mut current = dest;
    while current != src {
        let Some(&p) = prev.get(&current) else {
            return Vec::new();
        };
        path.push(p);
        current = p;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> RouterId {
        RouterId::new(n)
    }

    fn line(n: u32) -> RoutingTable {
        let mut t = RoutingTable::new();
        for i in 0..n - 1 {
            t.put_edge(id(i), id(i + 1), 1);
        }
        t
    }

    #[test]
    fn same_source_and_dest() {
        let t = line(3);
        assert_eq!(shortest_path(&t, id(1), id(1)), vec![id(1)]);
    }

    #[test]
    fn unknown_endpoints_are_empty() {
        let t = line(3);
        assert!(shortest_path(&t, id(99), id(1)).is_empty());
        assert!(shortest_path(&t, id(0), id(99)).is_empty());
    }

    #[test]
    fn shortest_hop_count_on_a_line() {
        let t = line(5);
        let path = shortest_path(&t, id(0), id(4));
        assert_eq!(path, vec![id(0), id(1), id(2), id(3), id(4)]);
    }

    #[test]
    fn no_repeated_router_in_path() {
        let mut t = RoutingTable::new();
        // triangle plus a pendant, to create a cycle BFS must not wander into
        t.put_edge(id(0), id(1), 1);
        t.put_edge(id(1), id(2), 1);
        t.put_edge(id(2), id(0), 1);
        t.put_edge(id(2), id(3), 1);

        let path = shortest_path(&t, id(0), id(3));
        let mut seen = HashSet::new();
        assert!(path.iter().all(|r| seen.insert(*r)));
        assert_eq!(path.len(), 3); // 0 -> 2 -> 3
    }

    #[test]
    fn disconnected_component_is_empty() {
        let mut t = RoutingTable::new();
        t.put_edge(id(0), id(1), 1);
        t.put_edge(id(2), id(3), 1);
        assert!(shortest_path(&t, id(0), id(3)).is_empty());
    }
}
