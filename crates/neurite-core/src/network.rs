//! Network container: neuron collection, synapse arena, connection protocol
//!
//! The network owns every compartment. Neurons (with their dendrites and
//! axon) live in a fixed iteration order; synapses live in an append-only
//! arena whose slots are tombstoned on destruction so previously issued
//! handles stay stable. All cross-references between compartments are
//! handles resolved through this container, and the connect/disconnect
//! protocol is the only code path that touches both sides of a link.

use crate::compartment::{Neuron, Synapse};
use crate::error::{CoreError, Result};
use crate::ids::{DendriteId, NeuronId, SynapseId};

/// The compartment graph of a whole network
#[derive(Debug, Clone, Default)]
pub struct Network {
    /// Neurons in fixed iteration order
    neurons: Vec<Neuron>,
    /// Synapse arena; `None` marks a destroyed synapse
    synapses: Vec<Option<Synapse>>,
}

impl Network {
    /// Create an empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network from an ordered neuron collection
    pub fn with_neurons(neurons: Vec<Neuron>) -> Self {
        Self {
            neurons,
            synapses: Vec::new(),
        }
    }

    /// Append a neuron, returning its handle
    pub fn add_neuron(&mut self, neuron: Neuron) -> NeuronId {
        let id = NeuronId::new(self.neurons.len() as u32);
        self.neurons.push(neuron);
        id
    }

    /// Number of neurons
    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    /// Number of live synapses in the arena
    pub fn synapse_count(&self) -> usize {
        self.synapses.iter().filter(|s| s.is_some()).count()
    }

    /// Resolve a neuron handle
    pub fn neuron(&self, id: NeuronId) -> Result<&Neuron> {
        self.neurons
            .get(id.index())
            .ok_or(CoreError::NeuronNotFound { neuron_id: id.raw() })
    }

    /// Resolve a neuron handle mutably
    pub(crate) fn neuron_mut(&mut self, id: NeuronId) -> Option<&mut Neuron> {
        self.neurons.get_mut(id.index())
    }

    /// Resolve a synapse handle; `None` for unknown or destroyed synapses
    pub fn synapse(&self, id: SynapseId) -> Option<&Synapse> {
        self.synapses.get(id.index()).and_then(|s| s.as_ref())
    }

    /// Resolve a synapse handle mutably
    pub fn synapse_mut(&mut self, id: SynapseId) -> Option<&mut Synapse> {
        self.synapses.get_mut(id.index()).and_then(|s| s.as_mut())
    }

    /// Resolve a dendrite handle
    pub fn dendrite(&self, id: DendriteId) -> Option<&crate::compartment::Dendrite> {
        self.neurons
            .get(id.neuron.index())
            .and_then(|n| n.dendrite(id.index as usize))
    }

    /// All neurons in iteration order
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Membrane potentials of all neurons, in iteration order (mV)
    pub fn membrane_potentials(&self) -> Vec<f32> {
        self.neurons.iter().map(|n| n.membrane_potential()).collect()
    }

    /// Connect a source neuron to a target neuron at a dendrite index
    ///
    /// Constructs a new synapse with the requested weight and inhibitory
    /// flag (activation threshold at the synapse default), owned by the
    /// source neuron's axon, and attaches it to the target dendrite. Both
    /// attachments are capacity-checked before any state changes, so a
    /// failed call leaves the network untouched and returns false.
    pub fn connect_neurons(
        &mut self,
        source: NeuronId,
        target: NeuronId,
        dendrite_index: usize,
        weight: f32,
        inhibitory: bool,
    ) -> bool {
        let Some(target_neuron) = self.neurons.get(target.index()) else {
            return false;
        };
        if dendrite_index >= target_neuron.dendrite_count() {
            return false;
        }
        let Some(dendrite) = target_neuron.dendrite(dendrite_index) else {
            return false;
        };
        if !dendrite.has_capacity() {
            return false;
        }
        let Some(source_neuron) = self.neurons.get(source.index()) else {
            return false;
        };
        if !source_neuron.axon().has_capacity() {
            return false;
        }

        let synapse_id = self.alloc_synapse(Synapse::new(
            weight,
            Synapse::DEFAULT_THRESHOLD,
            inhibitory,
            1,
        ));
        let dendrite_id = DendriteId::new(target, dendrite_index as u32);

        // Capacities were verified above; the three appends cannot fail.
        self.neurons[source.index()].axon_mut().attach_synapse(synapse_id);
        self.link(synapse_id, dendrite_id)
    }

    /// Attach an existing synapse to a dendrite, updating both sides
    ///
    /// Fails with no mutation when either handle is stale or either side is
    /// at capacity.
    pub fn link(&mut self, synapse: SynapseId, dendrite: DendriteId) -> bool {
        let Some(syn) = self.synapse(synapse) else {
            return false;
        };
        if !syn.has_target_capacity() {
            return false;
        }
        let Some(dend) = self.dendrite(dendrite) else {
            return false;
        };
        if !dend.has_capacity() {
            return false;
        }

        self.synapse_mut(synapse)
            .expect("synapse verified above")
            .attach_target(dendrite);
        self.neurons[dendrite.neuron.index()]
            .dendrite_mut(dendrite.index as usize)
            .expect("dendrite verified above")
            .attach_synapse(synapse);
        true
    }

    /// Detach a synapse from a dendrite, updating both sides
    ///
    /// Removal preserves the relative order of the remaining attachments on
    /// both lists. Returns false when the two were not linked.
    pub fn unlink(&mut self, synapse: SynapseId, dendrite: DendriteId) -> bool {
        let synapse_side = self
            .synapse_mut(synapse)
            .map(|s| s.detach_target(dendrite))
            .unwrap_or(false);
        let dendrite_side = self
            .neurons
            .get_mut(dendrite.neuron.index())
            .and_then(|n| n.dendrite_mut(dendrite.index as usize))
            .map(|d| d.detach_synapse(synapse))
            .unwrap_or(false);
        synapse_side && dendrite_side
    }

    /// Destroy a synapse: detach it everywhere, then tombstone its slot
    ///
    /// The synapse is first unlinked from every connected dendrite and from
    /// its owning axon, so no handle to it remains reachable before the
    /// slot is cleared.
    pub fn destroy_synapse(&mut self, id: SynapseId) -> bool {
        let Some(syn) = self.synapse(id) else {
            return false;
        };
        let targets: Vec<DendriteId> = syn.targets().to_vec();
        for dendrite in targets {
            self.unlink(id, dendrite);
        }
        for neuron in &mut self.neurons {
            if neuron.axon_mut().detach_synapse(id) {
                break;
            }
        }
        self.synapses[id.index()] = None;
        true
    }

    /// Integrated synaptic input of a dendrite (mV)
    ///
    /// Sums every attached synapse's signed contribution unconditionally.
    /// The synapse activation threshold is not consulted on this path.
    pub fn dendrite_integration(&self, id: DendriteId) -> f32 {
        let Some(dendrite) = self.dendrite(id) else {
            return 0.0;
        };
        dendrite
            .synapses()
            .iter()
            .filter_map(|&s| self.synapse(s))
            .map(|s| s.contribution())
            .sum()
    }

    /// Integrated synaptic input of a whole neuron (mV)
    ///
    /// Sum of all dendritic integrations, in dendrite order.
    pub fn neuron_integration(&self, id: NeuronId) -> f32 {
        let Some(neuron) = self.neurons.get(id.index()) else {
            return 0.0;
        };
        (0..neuron.dendrite_count())
            .map(|i| self.dendrite_integration(DendriteId::new(id, i as u32)))
            .sum()
    }

    /// Check cross-link consistency between synapses and dendrites
    pub fn validate(&self) -> Result<()> {
        for (slot, synapse) in self.synapses.iter().enumerate() {
            let Some(synapse) = synapse else { continue };
            let id = SynapseId::new(slot as u32);
            for &target in synapse.targets() {
                let linked = self
                    .dendrite(target)
                    .map(|d| d.synapses().contains(&id))
                    .unwrap_or(false);
                if !linked {
                    return Err(CoreError::network_topology(format!(
                        "synapse {} lists {} but the dendrite does not list it back",
                        id, target
                    )));
                }
            }
        }
        for (n, neuron) in self.neurons.iter().enumerate() {
            for (d, dendrite) in neuron.dendrites().iter().enumerate() {
                let dendrite_id = DendriteId::new(NeuronId::new(n as u32), d as u32);
                for &synapse in dendrite.synapses() {
                    let linked = self
                        .synapse(synapse)
                        .map(|s| s.targets().contains(&dendrite_id))
                        .unwrap_or(false);
                    if !linked {
                        return Err(CoreError::network_topology(format!(
                            "dendrite {} lists {} but the synapse does not list it back",
                            dendrite_id, synapse
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn alloc_synapse(&mut self, synapse: Synapse) -> SynapseId {
        let id = SynapseId::new(self.synapses.len() as u32);
        self.synapses.push(Some(synapse));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Archetype;

    fn two_neuron_network() -> Network {
        let mut network = Network::new();
        network.add_neuron(Archetype::Pyramidal.build());
        network.add_neuron(Archetype::Pyramidal.build());
        network
    }

    #[test]
    fn test_connect_neurons() {
        let mut network = two_neuron_network();
        let source = NeuronId::new(0);
        let target = NeuronId::new(1);

        assert!(network.connect_neurons(source, target, 0, 2.0, false));
        assert_eq!(network.synapse_count(), 1);
        assert_eq!(network.neuron(source).unwrap().axon().synapse_count(), 1);
        assert_eq!(
            network.dendrite(DendriteId::new(target, 0)).unwrap().synapse_count(),
            1
        );
        network.validate().unwrap();
    }

    #[test]
    fn test_connect_invalid_dendrite_index() {
        let mut network = two_neuron_network();
        let count_before = network.synapse_count();
        assert!(!network.connect_neurons(NeuronId::new(0), NeuronId::new(1), 99, 2.0, false));
        assert_eq!(network.synapse_count(), count_before);
    }

    #[test]
    fn test_connect_invalid_target_neuron() {
        let mut network = two_neuron_network();
        assert!(!network.connect_neurons(NeuronId::new(0), NeuronId::new(9), 0, 2.0, false));
        assert_eq!(network.synapse_count(), 0);
    }

    #[test]
    fn test_axon_capacity_failure_leaves_state_unchanged() {
        let mut network = Network::new();
        let mut source_neuron = crate::compartment::Neuron::new(20.0, 4, true, Archetype::Pyramidal)
            .with_axon(crate::compartment::Axon::new(1000.0, 1.0, true, 1));
        source_neuron.add_dendrite(crate::compartment::Dendrite::default());
        let source = network.add_neuron(source_neuron);

        let mut target = crate::compartment::Neuron::new(20.0, 4, true, Archetype::Pyramidal);
        target.add_dendrite(crate::compartment::Dendrite::default());
        let target = network.add_neuron(target);

        assert!(network.connect_neurons(source, target, 0, 2.0, false));
        let live_before = network.synapse_count();

        // Axon full: the second attempt must not allocate anything
        assert!(!network.connect_neurons(source, target, 0, 2.0, false));
        assert_eq!(network.synapse_count(), live_before);
        assert_eq!(network.neuron(source).unwrap().axon().synapse_count(), 1);
        network.validate().unwrap();
    }

    #[test]
    fn test_mutual_disconnect() {
        let mut network = two_neuron_network();
        let target = NeuronId::new(1);
        assert!(network.connect_neurons(NeuronId::new(0), target, 0, 2.0, false));

        let synapse = network.neuron(NeuronId::new(0)).unwrap().axon().synapses()[0];
        let dendrite = DendriteId::new(target, 0);

        assert!(network.unlink(synapse, dendrite));
        assert_eq!(network.synapse(synapse).unwrap().target_count(), 0);
        assert_eq!(network.dendrite(dendrite).unwrap().synapse_count(), 0);

        // Already detached: both sides report not-found
        assert!(!network.unlink(synapse, dendrite));
        network.validate().unwrap();
    }

    #[test]
    fn test_destroy_synapse_disconnects_first() {
        let mut network = two_neuron_network();
        let target = NeuronId::new(1);
        assert!(network.connect_neurons(NeuronId::new(0), target, 0, 2.0, false));
        let synapse = network.neuron(NeuronId::new(0)).unwrap().axon().synapses()[0];

        assert!(network.destroy_synapse(synapse));
        assert!(network.synapse(synapse).is_none());
        assert_eq!(network.dendrite(DendriteId::new(target, 0)).unwrap().synapse_count(), 0);
        assert_eq!(network.neuron(NeuronId::new(0)).unwrap().axon().synapse_count(), 0);
        assert_eq!(network.synapse_count(), 0);
        network.validate().unwrap();
    }

    #[test]
    fn test_integration_sums_signed_contributions() {
        let mut network = two_neuron_network();
        let target = NeuronId::new(1);
        assert!(network.connect_neurons(NeuronId::new(0), target, 0, 2.0, false));
        assert!(network.connect_neurons(NeuronId::new(0), target, 0, 3.0, true));

        let dendrite = DendriteId::new(target, 0);
        assert!((network.dendrite_integration(dendrite) - (-1.0)).abs() < 1e-6);
        assert!((network.neuron_integration(target) - (-1.0)).abs() < 1e-6);
    }
}
