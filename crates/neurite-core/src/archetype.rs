//! Archetype factory: the five structural neuron presets
//!
//! Every preset produces the same [`Neuron`] type running the same update
//! and propagation algorithms; archetypes differ only in soma size,
//! dendrite geometry, spike amplitude, threshold, and (for motor neurons)
//! the axon. Pure data configuration, no behavioral specialization.

use core::fmt;

use crate::compartment::{Axon, Dendrite, Neuron};
use crate::simulator::NETWORK_SIZE;

/// Structural neuron preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Archetype {
    /// Most common excitatory cortical neuron
    Pyramidal,
    /// Inhibitory neuron with a lowered threshold
    Interneuron,
    /// Cerebellar Purkinje cell with an extensive dendritic tree
    Purkinje,
    /// Motor neuron with a long myelinated axon
    Motor,
    /// Sensory neuron with few, specialized dendrites
    Sensory,
}

impl Archetype {
    /// Build a neuron configured with this preset's parameters
    pub fn build(self) -> Neuron {
        match self {
            Self::Pyramidal => {
                let mut neuron = Neuron::new(25.0, 15, true, self);
                neuron.add_dendrite(Dendrite::new(800.0, 3.0, 8000)); // apical
                neuron.add_dendrite(Dendrite::new(400.0, 2.0, 3000));
                neuron.add_dendrite(Dendrite::new(350.0, 2.0, 2500));
                neuron.add_dendrite(Dendrite::new(300.0, 1.8, 2000));
                neuron
            }
            Self::Interneuron => {
                // Smaller spikes, more excitable
                let mut neuron = Neuron::new(15.0, 8, false, self)
                    .with_spike_amplitude(40.0)
                    .with_threshold(-45.0);
                neuron.add_dendrite(Dendrite::new(200.0, 1.5, 1000));
                neuron.add_dendrite(Dendrite::new(180.0, 1.5, 800));
                neuron.add_dendrite(Dendrite::new(160.0, 1.4, 600));
                neuron
            }
            Self::Purkinje => {
                let mut neuron = Neuron::new(30.0, 20, false, self).with_spike_amplitude(60.0);
                for i in 0..8 {
                    neuron.add_dendrite(Dendrite::new(600.0 + i as f32 * 50.0, 2.5, 15_000));
                }
                neuron
            }
            Self::Motor => {
                // Strong spikes and a very long axon out to muscle targets
                let mut neuron = Neuron::new(40.0, 12, true, self)
                    .with_spike_amplitude(70.0)
                    .with_axon(Axon::new(100_000.0, 15.0, true, 100));
                for _ in 0..6 {
                    neuron.add_dendrite(Dendrite::new(500.0, 4.0, 5000));
                }
                neuron
            }
            Self::Sensory => {
                let mut neuron = Neuron::new(18.0, 6, true, self).with_threshold(-55.0);
                neuron.add_dendrite(Dendrite::new(250.0, 2.0, 1500));
                neuron.add_dendrite(Dendrite::new(200.0, 1.8, 1200));
                neuron
            }
        }
    }

    /// Human-readable preset name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pyramidal => "pyramidal",
            Self::Interneuron => "interneuron",
            Self::Purkinje => "purkinje",
            Self::Motor => "motor",
            Self::Sensory => "sensory",
        }
    }

    /// The fixed archetype lineup of a simulated network, in index order
    pub fn standard_lineup() -> [Archetype; NETWORK_SIZE] {
        [
            Self::Pyramidal,
            Self::Pyramidal,
            Self::Pyramidal,
            Self::Pyramidal,
            Self::Interneuron,
            Self::Purkinje,
            Self::Motor,
            Self::Motor,
            Self::Sensory,
            Self::Sensory,
        ]
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pyramidal_geometry() {
        let neuron = Archetype::Pyramidal.build();
        assert_eq!(neuron.soma_diameter(), 25.0);
        assert_eq!(neuron.dendrite_count(), 4);
        assert!(neuron.is_excitatory());
        assert_eq!(neuron.spike_amplitude(), 50.0);
        assert_eq!(neuron.threshold_potential(), -50.0);
        // Apical dendrite has the largest spine count
        assert_eq!(neuron.dendrite(0).unwrap().spine_count(), 8000);
    }

    #[test]
    fn test_interneuron_is_inhibitory_and_excitable() {
        let neuron = Archetype::Interneuron.build();
        assert!(!neuron.is_excitatory());
        assert_eq!(neuron.spike_amplitude(), 40.0);
        assert_eq!(neuron.threshold_potential(), -45.0);
        assert_eq!(neuron.dendrite_count(), 3);
    }

    #[test]
    fn test_purkinje_dendritic_tree() {
        let neuron = Archetype::Purkinje.build();
        assert_eq!(neuron.dendrite_count(), 8);
        assert!(!neuron.is_excitatory());
        assert_eq!(neuron.spike_amplitude(), 60.0);
        // Lengths step up by 50 µm per branch
        assert_eq!(neuron.dendrite(0).unwrap().length(), 600.0);
        assert_eq!(neuron.dendrite(7).unwrap().length(), 950.0);
    }

    #[test]
    fn test_motor_axon() {
        let neuron = Archetype::Motor.build();
        assert_eq!(neuron.spike_amplitude(), 70.0);
        let axon = neuron.axon();
        assert_eq!(axon.length(), 100_000.0);
        assert_eq!(axon.diameter(), 15.0);
        assert!(axon.is_myelinated());
        assert_eq!(axon.conduction_velocity(), 90.0);
    }

    #[test]
    fn test_sensory_threshold() {
        let neuron = Archetype::Sensory.build();
        assert_eq!(neuron.threshold_potential(), -55.0);
        assert_eq!(neuron.dendrite_count(), 2);
    }

    #[test]
    fn test_standard_lineup() {
        let lineup = Archetype::standard_lineup();
        assert_eq!(lineup.len(), NETWORK_SIZE);
        assert_eq!(lineup[4], Archetype::Interneuron);
        assert_eq!(lineup[5], Archetype::Purkinje);
        assert_eq!(lineup[9], Archetype::Sensory);
    }
}
