//! Decorative address labels (§6).
//!
//! These exist purely for log readability — an agent's address has no
//! routing significance and collisions are never checked, matching the
//! spec's explicit "no CIDR-correct addressing" non-goal. Generation must
//! not reseed its RNG on every call (§9, "Random reseed"); callers are
//! expected to hold one long-lived generator per agent and pass it in.

use rand::Rng;

/// A random IPv4-shaped label with a CIDR prefix derived from the degree of
/// the node it decorates. Collisions are possible and not handled.
#[must_use]
pub fn generate(rng: &mut impl Rng, neighbour_count: usize) -> String {
    let octets: [u8; 4] = rng.gen();
    let prefix = cidr_prefix(neighbour_count);
    format!(
        "{}.{}.{}.{}/{}",
        octets[0], octets[1], octets[2], octets[3], prefix
    )
}

/// Smaller subnets (higher prefix) for low-degree nodes, wider ones for
/// high-degree hubs. Purely cosmetic; clamped to a plausible IPv4 range.
fn cidr_prefix(neighbour_count: usize) -> u8 {
    let hosts_needed = neighbour_count.max(1) as u32;
    let host_bits = 32 - hosts_needed.leading_zeros();
    32u8.saturating_sub(host_bits as u8).clamp(8, 30)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generate_is_ipv4_shaped() {
        let mut rng = StdRng::seed_from_u64(42);
        let addr = generate(&mut rng, 3);
        let (ip, prefix) = addr.split_once('/').unwrap();
        let octets: Vec<_> = ip.split('.').collect();
        assert_eq!(octets.len(), 4);
        for o in octets {
            assert!(o.parse::<u8>().is_ok());
        }
        assert!(prefix.parse::<u8>().unwrap() >= 8);
    }

    #[test]
    fn wider_degree_yields_wider_subnet() {
        assert!(cidr_prefix(1) >= cidr_prefix(64));
    }

    #[test]
    fn zero_neighbours_does_not_panic() {
        let _ = cidr_prefix(0);
    }
}
