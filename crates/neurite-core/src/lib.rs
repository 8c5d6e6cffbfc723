//! Compartmental spiking-neuron network engine
//!
//! This crate provides a discrete-time simulator for a small network of
//! biologically structured neurons. Each neuron is a graph of compartments
//! (soma, dendrites, one axon, synapses) whose membrane potentials evolve
//! under synaptic input, fire discrete spike events on threshold crossing,
//! and can be perturbed by scripted metabolic dysfunction scenarios such as
//! hypoglycemia or hypoxia.
//!
//! The engine is single-threaded and deterministic: every stochastic step
//! draws from an explicit, seedable generator owned by the driver, so two
//! runs with the same seed and parameters produce identical records.

#![deny(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod archetype;
pub mod cascade;
pub mod compartment;
pub mod condition;
pub mod error;
pub mod ids;
pub mod metrics;
pub mod network;
pub mod record;
pub mod simulator;

// Re-export essential types
pub use archetype::Archetype;
pub use cascade::CascadeState;
pub use compartment::{Axon, Dendrite, Neuron, Synapse};
pub use condition::MetabolicCondition;
pub use error::{CoreError, Result};
pub use ids::{DendriteId, NeuronId, SynapseId};
pub use metrics::StabilityMetrics;
pub use network::Network;
pub use record::{SimulationRecord, SpikeEvent};
pub use simulator::{Simulator, SimulatorConfig, NETWORK_SIZE};
