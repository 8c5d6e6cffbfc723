//! Synapse: weighted, signed coupling between an axon and target dendrites

use crate::ids::DendriteId;

/// Lower clamp bound for synaptic weight (mV)
pub const WEIGHT_MIN: f32 = 0.1;
/// Upper clamp bound for synaptic weight (mV)
pub const WEIGHT_MAX: f32 = 10.0;

/// A chemical synapse with a clamped weight and an activation threshold
///
/// The signed contribution is `+weight` for excitatory synapses and
/// `-weight` for inhibitory ones; this sign convention is used uniformly
/// by both integration paths. The activation threshold only gates the
/// axon-cascade path (see [`Synapse::transmits`]); direct dendritic
/// integration sums contributions unconditionally.
#[derive(Debug, Clone, PartialEq)]
pub struct Synapse {
    /// Synaptic strength (mV, EPSP/IPSP amplitude)
    weight: f32,
    /// Activation threshold for cascade transmission (mV)
    threshold: f32,
    /// True for inhibitory, false for excitatory
    inhibitory: bool,
    /// Connected target dendrites, in attachment order
    targets: Vec<DendriteId>,
    /// Maximum allowed target connections
    max_targets: usize,
}

impl Synapse {
    /// Default activation threshold (mV)
    pub const DEFAULT_THRESHOLD: f32 = -50.0;

    /// Create a new synapse
    ///
    /// The weight is clamped into [`WEIGHT_MIN`]..=[`WEIGHT_MAX`] on
    /// construction and stays inside that range under any later adjustment.
    pub fn new(weight: f32, threshold: f32, inhibitory: bool, max_targets: usize) -> Self {
        Self {
            weight: weight.clamp(WEIGHT_MIN, WEIGHT_MAX),
            threshold,
            inhibitory,
            targets: Vec::new(),
            max_targets,
        }
    }

    /// Signed contribution to a postsynaptic compartment (mV)
    pub fn contribution(&self) -> f32 {
        if self.inhibitory {
            -self.weight
        } else {
            self.weight
        }
    }

    /// Check whether cascade transmission occurs at the given amplitude
    ///
    /// Transmission happens when `amplitude + contribution` reaches the
    /// activation threshold. Only the axon-cascade path consults this
    /// predicate; direct integration does not.
    pub fn transmits(&self, amplitude: f32) -> bool {
        amplitude + self.contribution() >= self.threshold
    }

    /// Adjust the weight by a delta, clamping into the allowed range
    pub fn adjust_weight(&mut self, delta: f32) {
        self.weight = (self.weight + delta).clamp(WEIGHT_MIN, WEIGHT_MAX);
    }

    /// Get the current weight
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Get the activation threshold
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether this synapse is inhibitory
    pub fn is_inhibitory(&self) -> bool {
        self.inhibitory
    }

    /// Connected target dendrites, in attachment order
    pub fn targets(&self) -> &[DendriteId] {
        &self.targets
    }

    /// Number of connected target dendrites
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Remaining target capacity
    pub fn has_target_capacity(&self) -> bool {
        self.targets.len() < self.max_targets
    }

    /// Append a target dendrite; fails with no mutation when full
    pub(crate) fn attach_target(&mut self, dendrite: DendriteId) -> bool {
        if self.targets.len() >= self.max_targets {
            return false;
        }
        self.targets.push(dendrite);
        true
    }

    /// Remove a target dendrite, preserving the order of the rest
    pub(crate) fn detach_target(&mut self, dendrite: DendriteId) -> bool {
        match self.targets.iter().position(|&d| d == dendrite) {
            Some(pos) => {
                self.targets.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl Default for Synapse {
    fn default() -> Self {
        Self::new(1.0, Self::DEFAULT_THRESHOLD, false, 1)
    }
}
