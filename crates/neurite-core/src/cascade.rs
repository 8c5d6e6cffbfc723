//! Signal propagation: spike firing and the per-tick cascade queue
//!
//! A spike propagates through the firing neuron's axon to its synapses,
//! each synapse gates the transmission against its activation threshold,
//! and a successful transmission updates the target dendrite and re-evaluates
//! that dendrite's parent neuron, which may itself fire and extend the
//! cascade. All of this happens synchronously inside the call that triggered
//! the spike, before the driver moves on to the next neuron index, so later
//! neurons in the fixed iteration order can observe state already changed by
//! an earlier neuron's cascade within the same tick.
//!
//! Instead of recursing through the graph, transmissions are pushed onto an
//! explicit queue drained to a fixed point. Re-entrancy policy, per tick:
//! each neuron is re-evaluated by the cascade at most once and fires at most
//! once; dendrite membrane updates are always applied. This bounds the
//! cascade on cyclic topologies (each neuron contributes its axon fan-out at
//! most once per tick) while keeping the acyclic behavior unchanged.

use std::collections::VecDeque;

use crate::ids::{NeuronId, SynapseId};
use crate::network::Network;

/// One gated transmission waiting to be applied
#[derive(Debug, Clone, Copy)]
struct Transmission {
    /// The synapse carrying the signal
    synapse: SynapseId,
    /// Action potential amplitude at the synapse (mV)
    amplitude: f32,
}

/// Per-tick cascade bookkeeping
///
/// Create one at the start of each tick and pass it to every spike-inducing
/// call in that tick; the fired/evaluated marks are shared by all cascades
/// of the tick.
#[derive(Debug)]
pub struct CascadeState {
    /// Neurons that have fired this tick (via cascade or forced)
    fired: Vec<bool>,
    /// Neurons already re-evaluated by a cascade this tick
    evaluated: Vec<bool>,
    /// Pending transmissions
    queue: VecDeque<Transmission>,
}

impl CascadeState {
    /// Create bookkeeping for a network of `neuron_count` neurons
    pub fn new(neuron_count: usize) -> Self {
        Self {
            fired: vec![false; neuron_count],
            evaluated: vec![false; neuron_count],
            queue: VecDeque::new(),
        }
    }

    /// Whether a neuron has fired this tick
    pub fn has_fired(&self, id: NeuronId) -> bool {
        self.fired.get(id.index()).copied().unwrap_or(false)
    }

    fn mark_fired(&mut self, id: NeuronId) {
        if let Some(slot) = self.fired.get_mut(id.index()) {
            *slot = true;
        }
    }

    fn try_claim_evaluation(&mut self, id: NeuronId) -> bool {
        match self.evaluated.get_mut(id.index()) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }
}

impl Network {
    /// Force a neuron to spike, cascading synchronously
    ///
    /// Used for scripted stimulation and metabolic perturbation. The spike
    /// is unconditional: refractory state does not prevent it, and the
    /// refractory counter is re-armed. The cascade drains before returning.
    pub fn force_spike(&mut self, id: NeuronId, cascade: &mut CascadeState) {
        let Some(neuron) = self.neuron_mut(id) else {
            return;
        };
        let amplitude = neuron.enter_spike();
        cascade.mark_fired(id);
        self.enqueue_axon(id, amplitude, cascade);
        self.drain(cascade);
    }

    /// Run one update of a neuron's spike state machine
    ///
    /// Refractory neurons consume the tick without spiking. Otherwise the
    /// dendritic input sum is integrated and, on threshold crossing, the
    /// neuron spikes and its cascade drains before the call returns. The
    /// return value is the spike report the driver records.
    pub fn update_and_check_spike(&mut self, id: NeuronId, cascade: &mut CascadeState) -> bool {
        {
            let Some(neuron) = self.neuron_mut(id) else {
                return false;
            };
            if neuron.tick_refractory() {
                return false;
            }
        }

        let input = self.neuron_integration(id);
        let Some(neuron) = self.neuron_mut(id) else {
            return false;
        };
        if !neuron.integrate(input) {
            return false;
        }

        let amplitude = neuron.enter_spike();
        cascade.mark_fired(id);
        self.enqueue_axon(id, amplitude, cascade);
        self.drain(cascade);
        true
    }

    /// Push every output synapse of a neuron's axon onto the queue
    fn enqueue_axon(&self, id: NeuronId, amplitude: f32, cascade: &mut CascadeState) {
        let Ok(neuron) = self.neuron(id) else {
            return;
        };
        for &synapse in neuron.axon().synapses() {
            cascade.queue.push_back(Transmission { synapse, amplitude });
        }
    }

    /// Drain the transmission queue to a fixed point
    fn drain(&mut self, cascade: &mut CascadeState) {
        while let Some(Transmission { synapse, amplitude }) = cascade.queue.pop_front() {
            let Some(syn) = self.synapse(synapse) else {
                continue;
            };
            if !syn.transmits(amplitude) {
                continue;
            }
            let targets: Vec<_> = syn.targets().to_vec();

            for dendrite_id in targets {
                // Dendrite state always updates, even when the parent's
                // re-evaluation is suppressed by the once-per-tick policy.
                let input = self.dendrite_integration(dendrite_id);
                let Some(parent) = self.neuron_mut(dendrite_id.neuron) else {
                    continue;
                };
                let Some(dendrite) = parent.dendrite_mut(dendrite_id.index as usize) else {
                    continue;
                };
                dendrite.apply_integration(input);

                self.reevaluate_parent(dendrite_id.neuron, cascade);
            }
        }
    }

    /// Re-evaluate a dendrite's parent after a transmission, at most once per tick
    fn reevaluate_parent(&mut self, id: NeuronId, cascade: &mut CascadeState) {
        if !cascade.try_claim_evaluation(id) {
            return;
        }
        let input = self.neuron_integration(id);
        let Some(neuron) = self.neuron_mut(id) else {
            return;
        };
        if neuron.tick_refractory() {
            return;
        }
        if !neuron.integrate(input) {
            return;
        }

        let amplitude = neuron.enter_spike();
        cascade.mark_fired(id);
        self.enqueue_axon(id, amplitude, cascade);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Archetype;
    use crate::compartment::{Dendrite, Neuron};

    /// Two plain neurons, A heavily wired into B's first dendrite
    fn wired_pair(weight: f32, links: usize) -> Network {
        let mut network = Network::new();
        let a = network.add_neuron(Archetype::Pyramidal.build());
        let b = network.add_neuron(Archetype::Pyramidal.build());
        for _ in 0..links {
            assert!(network.connect_neurons(a, b, 0, weight, false));
        }
        network
    }

    #[test]
    fn test_forced_spike_sets_state() {
        let mut network = wired_pair(2.0, 1);
        let mut cascade = CascadeState::new(network.neuron_count());

        network.force_spike(NeuronId::new(0), &mut cascade);

        let source = network.neuron(NeuronId::new(0)).unwrap();
        assert!(source.is_spiking());
        assert_eq!(source.membrane_potential(), source.spike_amplitude());
        assert_eq!(source.refractory_ticks(), 2);
        assert!(cascade.has_fired(NeuronId::new(0)));
    }

    #[test]
    fn test_cascade_updates_target_dendrite() {
        let mut network = wired_pair(2.0, 1);
        let mut cascade = CascadeState::new(network.neuron_count());

        network.force_spike(NeuronId::new(0), &mut cascade);

        // Transmission gate: 50 + 2 >= -50, so B's dendrite updated:
        // -70 + 2 = -68, decayed by 0.1
        let dendrite = network
            .dendrite(crate::ids::DendriteId::new(NeuronId::new(1), 0))
            .unwrap();
        assert!((dendrite.membrane_potential() - (-68.1)).abs() < 1e-5);
    }

    #[test]
    fn test_cascade_fires_downstream_neuron() {
        // 10 excitatory links of weight 2.5 -> B integrates +25 and crosses
        // its -50 threshold when re-evaluated
        let mut network = wired_pair(2.5, 10);
        let mut cascade = CascadeState::new(network.neuron_count());

        network.force_spike(NeuronId::new(0), &mut cascade);

        let b = network.neuron(NeuronId::new(1)).unwrap();
        assert!(cascade.has_fired(NeuronId::new(1)));
        assert!(b.is_spiking());
        assert_eq!(b.membrane_potential(), b.spike_amplitude());
    }

    #[test]
    fn test_subthreshold_transmission_does_not_transmit() {
        // A weak (negative) amplitude fails the synapse gate, so the
        // target dendrite never updates.
        let mut network = Network::new();
        let mut a = Neuron::new(20.0, 4, true, Archetype::Pyramidal).with_spike_amplitude(-60.0);
        a.add_dendrite(Dendrite::default());
        let a = network.add_neuron(a);
        let mut b = Neuron::new(20.0, 4, true, Archetype::Pyramidal);
        b.add_dendrite(Dendrite::default());
        let b = network.add_neuron(b);
        assert!(network.connect_neurons(a, b, 0, 2.0, false));

        let mut cascade = CascadeState::new(network.neuron_count());
        network.force_spike(a, &mut cascade);

        // -60 + 2 < -50: gated out, dendrite untouched
        let dendrite = network.dendrite(crate::ids::DendriteId::new(b, 0)).unwrap();
        assert_eq!(dendrite.membrane_potential(), crate::compartment::RESTING_POTENTIAL);
    }

    #[test]
    fn test_cyclic_topology_terminates_and_fires_once() {
        // A and B strongly excite each other: the cascade must settle with
        // each neuron having fired exactly once this tick.
        let mut network = Network::new();
        let a = network.add_neuron(Archetype::Pyramidal.build());
        let b = network.add_neuron(Archetype::Pyramidal.build());
        for _ in 0..10 {
            assert!(network.connect_neurons(a, b, 0, 2.5, false));
            assert!(network.connect_neurons(b, a, 0, 2.5, false));
        }

        let mut cascade = CascadeState::new(network.neuron_count());
        network.force_spike(a, &mut cascade);

        assert!(cascade.has_fired(a));
        assert!(cascade.has_fired(b));
        // B's return volley re-evaluated A exactly once: one refractory
        // decrement, membrane back at rest. Further volleys were suppressed
        // by the once-per-tick policy.
        let a_neuron = network.neuron(a).unwrap();
        assert_eq!(a_neuron.refractory_ticks(), 1);
        assert_eq!(a_neuron.membrane_potential(), a_neuron.resting_potential());
        assert!(!a_neuron.is_spiking());
    }

    #[test]
    fn test_update_refractory_neuron_reports_no_spike() {
        let mut network = wired_pair(2.0, 1);
        let mut cascade = CascadeState::new(network.neuron_count());
        network.force_spike(NeuronId::new(0), &mut cascade);

        // Same tick: the driver's update sees the refractory counter
        let spiked = network.update_and_check_spike(NeuronId::new(0), &mut cascade);
        assert!(!spiked);
        let a = network.neuron(NeuronId::new(0)).unwrap();
        assert_eq!(a.membrane_potential(), a.resting_potential());
        assert_eq!(a.refractory_ticks(), 1);
    }

    #[test]
    fn test_update_spikes_on_threshold() {
        // Wire B <- A with enough weight that B's standing integration
        // alone crosses threshold, then update B directly.
        let mut network = wired_pair(2.5, 10);
        let mut cascade = CascadeState::new(network.neuron_count());

        let spiked = network.update_and_check_spike(NeuronId::new(1), &mut cascade);
        assert!(spiked);
        let b = network.neuron(NeuronId::new(1)).unwrap();
        assert_eq!(b.membrane_potential(), b.spike_amplitude());
        assert_eq!(b.refractory_ticks(), 2);
    }
}
