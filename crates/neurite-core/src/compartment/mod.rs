//! Compartment types: the anatomical units of a neuron
//!
//! A neuron owns an ordered, fixed-capacity list of dendrites and exactly
//! one axon; the axon owns the synapses created when the neuron connects to
//! a target. All cross-references between compartments are handles
//! ([`crate::ids`]), never direct references, and every connection list has
//! a capacity fixed at construction time. An attempt to append beyond
//! capacity fails with no mutation.

pub mod axon;
pub mod dendrite;
pub mod neuron;
pub mod synapse;

pub use axon::Axon;
pub use dendrite::Dendrite;
pub use neuron::Neuron;
pub use synapse::Synapse;

/// Resting membrane potential shared by all compartments (mV)
pub const RESTING_POTENTIAL: f32 = -70.0;
