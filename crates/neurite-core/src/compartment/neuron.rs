//! Neuron: soma state machine owning dendrites and a single axon

use crate::archetype::Archetype;
use crate::compartment::{Axon, Dendrite, RESTING_POTENTIAL};

/// Default action potential threshold (mV)
pub const DEFAULT_THRESHOLD: f32 = -50.0;
/// Default spike amplitude (mV)
pub const DEFAULT_SPIKE_AMPLITUDE: f32 = 50.0;
/// Refractory period after a spike, in ticks
pub const REFRACTORY_TICKS: u32 = 2;
/// Exponential relaxation factor toward rest per tick
const MEMBRANE_DECAY: f32 = 0.9;

/// A neuron soma with its owned dendrites and axon
///
/// The per-tick update is a three-state machine: Refractory (counter > 0),
/// Integrating (sum dendritic input, relax toward rest), and Spiking
/// (threshold crossed; membrane forced to the spike amplitude and the
/// refractory counter armed). The network-level half of the update (summing
/// dendritic integrations and propagating through the axon) lives in
/// [`crate::cascade`]; this type holds only the local state transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    /// Cell body diameter in micrometers
    soma_diameter: f32,
    /// Current membrane potential (mV)
    membrane_potential: f32,
    /// Resting membrane potential (mV)
    resting_potential: f32,
    /// Action potential threshold (mV)
    threshold_potential: f32,
    /// Action potential amplitude (mV)
    spike_amplitude: f32,
    /// Currently generating an action potential?
    spiking: bool,
    /// Ticks remaining before another spike is possible
    refractory: u32,
    /// True for excitatory, false for inhibitory
    excitatory: bool,
    /// Structural preset this neuron was built from
    archetype: Archetype,
    /// Owned dendrites, in attachment order
    dendrites: Vec<Dendrite>,
    /// Maximum dendrite count
    max_dendrites: usize,
    /// The single owned axon
    axon: Axon,
}

impl Neuron {
    /// Create a new neuron at resting potential with a default axon
    pub fn new(
        soma_diameter: f32,
        max_dendrites: usize,
        excitatory: bool,
        archetype: Archetype,
    ) -> Self {
        Self {
            soma_diameter,
            membrane_potential: RESTING_POTENTIAL,
            resting_potential: RESTING_POTENTIAL,
            threshold_potential: DEFAULT_THRESHOLD,
            spike_amplitude: DEFAULT_SPIKE_AMPLITUDE,
            spiking: false,
            refractory: 0,
            excitatory,
            archetype,
            dendrites: Vec::new(),
            max_dendrites,
            axon: Axon::default(),
        }
    }

    /// Override the spike amplitude (archetype configuration)
    pub fn with_spike_amplitude(mut self, amplitude: f32) -> Self {
        self.spike_amplitude = amplitude;
        self
    }

    /// Override the threshold potential (archetype configuration)
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold_potential = threshold;
        self
    }

    /// Replace the default axon (archetype configuration)
    pub fn with_axon(mut self, axon: Axon) -> Self {
        self.axon = axon;
        self
    }

    /// Append a dendrite; fails with no mutation when full
    pub fn add_dendrite(&mut self, dendrite: Dendrite) -> bool {
        if self.dendrites.len() >= self.max_dendrites {
            return false;
        }
        self.dendrites.push(dendrite);
        true
    }

    /// Consume the refractory state for this update, if armed
    ///
    /// Returns true when the neuron was refractory: the counter is
    /// decremented, the membrane forced to rest, and the spiking flag
    /// cleared. The caller must then report "no spike".
    pub(crate) fn tick_refractory(&mut self) -> bool {
        if self.refractory > 0 {
            self.refractory -= 1;
            self.membrane_potential = self.resting_potential;
            self.spiking = false;
            return true;
        }
        false
    }

    /// Integrate a dendritic input sum and test the threshold
    ///
    /// Sets `membrane = resting + input`. Returns true when the threshold is
    /// reached; the caller must follow up with [`Neuron::enter_spike`].
    /// Otherwise the membrane relaxes exponentially toward rest.
    pub(crate) fn integrate(&mut self, input: f32) -> bool {
        self.membrane_potential = self.resting_potential + input;

        if self.membrane_potential >= self.threshold_potential {
            return true;
        }

        if self.membrane_potential != self.resting_potential {
            self.membrane_potential = self.resting_potential
                + (self.membrane_potential - self.resting_potential) * MEMBRANE_DECAY;
        }
        false
    }

    /// Transition to the Spiking state
    ///
    /// Forces the membrane to the spike amplitude, arms the refractory
    /// counter, and returns the amplitude to propagate through the axon.
    pub(crate) fn enter_spike(&mut self) -> f32 {
        self.spiking = true;
        self.membrane_potential = self.spike_amplitude;
        self.refractory = REFRACTORY_TICKS;
        self.spike_amplitude
    }

    /// Current membrane potential (mV)
    pub fn membrane_potential(&self) -> f32 {
        self.membrane_potential
    }

    /// Whether the neuron is currently generating an action potential
    pub fn is_spiking(&self) -> bool {
        self.spiking
    }

    /// Whether the neuron is excitatory
    pub fn is_excitatory(&self) -> bool {
        self.excitatory
    }

    /// Ticks remaining before another spike is possible
    pub fn refractory_ticks(&self) -> u32 {
        self.refractory
    }

    /// The structural preset this neuron was built from
    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Cell body diameter in micrometers
    pub fn soma_diameter(&self) -> f32 {
        self.soma_diameter
    }

    /// Resting membrane potential (mV)
    pub fn resting_potential(&self) -> f32 {
        self.resting_potential
    }

    /// Action potential threshold (mV)
    pub fn threshold_potential(&self) -> f32 {
        self.threshold_potential
    }

    /// Action potential amplitude (mV)
    pub fn spike_amplitude(&self) -> f32 {
        self.spike_amplitude
    }

    /// Number of attached dendrites
    pub fn dendrite_count(&self) -> usize {
        self.dendrites.len()
    }

    /// Get a dendrite by index
    pub fn dendrite(&self, index: usize) -> Option<&Dendrite> {
        self.dendrites.get(index)
    }

    /// Get a mutable dendrite by index
    pub(crate) fn dendrite_mut(&mut self, index: usize) -> Option<&mut Dendrite> {
        self.dendrites.get_mut(index)
    }

    /// All dendrites, in attachment order
    pub fn dendrites(&self) -> &[Dendrite] {
        &self.dendrites
    }

    /// The neuron's axon
    pub fn axon(&self) -> &Axon {
        &self.axon
    }

    /// Mutable access to the axon
    pub(crate) fn axon_mut(&mut self) -> &mut Axon {
        &mut self.axon
    }
}
