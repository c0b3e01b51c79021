//! Shared identifiers for the router simulation.

use std::fmt;

/// Opaque router identifier, dense in `[0, N)` and assigned by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouterId(pub u32);

impl RouterId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RouterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "router-{}", self.0)
    }
}

impl From<u32> for RouterId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Local index into an agent's positional outbound-channel array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(pub usize);

impl Slot {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Stable integer identity for one directed half of an inter-router channel,
/// assigned by the harness at wiring time.
///
/// `NeighbourUpdate` carries this instead of a raw endpoint handle: `flume`
/// senders/receivers aren't comparable by identity across clones, so the
/// simulation follows the substitute the spec offers for that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u64);

impl ChannelId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_id_display() {
        assert_eq!(RouterId::new(3).to_string(), "router-3");
    }

    #[test]
    fn router_id_from_u32() {
        let id: RouterId = 7u32.into();
        assert_eq!(id.get(), 7);
    }
}
