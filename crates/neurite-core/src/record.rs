//! Simulation record: the accumulated per-tick history of a run

use crate::ids::NeuronId;

/// A recorded spike event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpikeEvent {
    /// Tick at which the spike was observed
    pub timestep: usize,
    /// The neuron that spiked
    pub neuron: NeuronId,
}

/// Accumulated history of one simulation run
///
/// Appended to once per tick by the driver and consumed post-hoc by the
/// stability metrics and the export collaborator. Spike events record only
/// spikes observed by the driver's own update loop; forced spikes and
/// cascade-internal spikes surface here one tick later, if at all, through
/// the refractory machinery.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationRecord {
    /// Per-tick membrane potential snapshot, ordered by neuron index (mV)
    pub membrane_potentials: Vec<Vec<f32>>,
    /// Spike events in recording order
    pub spike_events: Vec<SpikeEvent>,
    /// Mean membrane potential per tick (mV)
    pub network_activity: Vec<f32>,
    /// Total ticks executed
    pub total_timesteps: usize,
    /// Total spike events recorded
    pub total_spikes: usize,
}

impl SimulationRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded data
    pub fn clear(&mut self) {
        self.membrane_potentials.clear();
        self.spike_events.clear();
        self.network_activity.clear();
        self.total_timesteps = 0;
        self.total_spikes = 0;
    }

    /// Append one tick's membrane snapshot and its mean activity
    pub fn record_snapshot(&mut self, potentials: Vec<f32>) {
        let mean = if potentials.is_empty() {
            0.0
        } else {
            potentials.iter().sum::<f32>() / potentials.len() as f32
        };
        self.membrane_potentials.push(potentials);
        self.network_activity.push(mean);
    }

    /// Append a spike event
    pub fn record_spike(&mut self, timestep: usize, neuron: NeuronId) {
        self.spike_events.push(SpikeEvent { timestep, neuron });
    }

    /// Spike ticks of one neuron, in recording order
    pub fn spikes_for_neuron(&self, neuron: NeuronId) -> Vec<usize> {
        self.spike_events
            .iter()
            .filter(|e| e.neuron == neuron)
            .map(|e| e.timestep)
            .collect()
    }

    /// Spike counts bucketed per tick over `total_timesteps`
    ///
    /// Events outside the recorded tick range are ignored.
    pub fn spikes_per_timestep(&self) -> Vec<usize> {
        let mut buckets = vec![0usize; self.total_timesteps];
        for event in &self.spike_events {
            if event.timestep < self.total_timesteps {
                buckets[event.timestep] += 1;
            }
        }
        buckets
    }

    /// Mean network activity over the whole run (mV); 0 when empty
    pub fn mean_activity(&self) -> f32 {
        if self.network_activity.is_empty() {
            return 0.0;
        }
        self.network_activity.iter().sum::<f32>() / self.network_activity.len() as f32
    }
}
