//! Handle types for compartments
//!
//! Every cross-reference between compartments is expressed as one of these
//! plain handles rather than a direct reference. Handles are validated at
//! the point of use; a handle whose target no longer exists resolves to
//! `None` instead of dangling.

use core::fmt;

/// Unique identifier for a neuron in a network
///
/// The raw value is the neuron's index in the network's fixed iteration
/// order; driver loops and recorded spike events use the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeuronId(pub u32);

impl NeuronId {
    /// Create a new neuron ID
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Get the ID as a collection index
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Invalid neuron ID constant
    pub const INVALID: Self = Self(u32::MAX);

    /// Check if this is a valid neuron ID
    pub const fn is_valid(&self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

impl From<u32> for NeuronId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<usize> for NeuronId {
    fn from(id: usize) -> Self {
        Self(id as u32)
    }
}

/// Identifier for a dendrite, addressed through its owning neuron
///
/// Dendrites are owned by their parent neuron and never removed during a
/// run, so the (neuron, index) pair is stable for the network's lifetime.
/// The neuron half doubles as the back-reference used when a dendrite
/// update must notify its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DendriteId {
    /// Owning neuron
    pub neuron: NeuronId,
    /// Position in the neuron's dendrite list
    pub index: u32,
}

impl DendriteId {
    /// Create a new dendrite ID
    pub const fn new(neuron: NeuronId, index: u32) -> Self {
        Self { neuron, index }
    }
}

impl fmt::Display for DendriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:D{}", self.neuron, self.index)
    }
}

/// Unique identifier for a synapse in the network's synapse arena
///
/// Slots are append-only; destroying a synapse tombstones its slot, so
/// previously issued IDs stay stable and resolve to `None` afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SynapseId(pub u32);

impl SynapseId {
    /// Create a new synapse ID
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw slot value
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Get the ID as an arena index
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SynapseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neuron_id() {
        let id = NeuronId::new(42);
        assert_eq!(id.raw(), 42);
        assert!(id.is_valid());
        assert_eq!(format!("{}", id), "N42");

        let invalid = NeuronId::INVALID;
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_dendrite_id_display() {
        let id = DendriteId::new(NeuronId::new(3), 1);
        assert_eq!(format!("{}", id), "N3:D1");
    }

    #[test]
    fn test_synapse_id() {
        let id = SynapseId::new(7);
        assert_eq!(id.index(), 7);
        assert_eq!(format!("{}", id), "S7");
    }
}
