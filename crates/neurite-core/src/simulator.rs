//! Discrete-time simulation driver
//!
//! Owns the fixed ten-neuron network, steps time, injects scripted
//! stimulation, background noise, and metabolic perturbation, and records
//! per-tick snapshots. The driver is the only mutator of the network
//! besides the propagation cascades it triggers; every stochastic decision
//! draws from the driver's own seedable generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::archetype::Archetype;
use crate::cascade::CascadeState;
use crate::condition::MetabolicCondition;
use crate::error::{CoreError, Result};
use crate::ids::NeuronId;
use crate::metrics::StabilityMetrics;
use crate::network::Network;
use crate::record::SimulationRecord;

/// Fixed logical size of the simulated network
pub const NETWORK_SIZE: usize = 10;
/// Default outgoing connection attempts per neuron during wiring
pub const DEFAULT_CONNECTION_DENSITY: usize = 6;
/// Default per-neuron background noise probability per tick
pub const DEFAULT_NOISE_PROBABILITY: f32 = 0.6;
/// Seed used when none is configured
const DEFAULT_SEED: u64 = 42;

/// Driver configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Outgoing connection attempts per neuron during topology setup
    pub connection_density: usize,
    /// Per-neuron probability of a background noise draw per tick
    pub noise_probability: f32,
    /// Seed for the driver's random source; `None` uses the default seed
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            connection_density: DEFAULT_CONNECTION_DENSITY,
            noise_probability: DEFAULT_NOISE_PROBABILITY,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the connection density
    pub fn with_connection_density(mut self, density: usize) -> Self {
        self.connection_density = density;
        self
    }

    /// Set the background noise probability
    pub fn with_noise_probability(mut self, probability: f32) -> Self {
        self.noise_probability = probability;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.noise_probability) {
            return Err(CoreError::invalid_parameter(
                "noise_probability",
                self.noise_probability.to_string(),
                "0.0..=1.0",
            ));
        }
        Ok(())
    }
}

/// The discrete-time simulation driver
#[derive(Debug)]
pub struct Simulator {
    /// Driver configuration
    config: SimulatorConfig,
    /// The network under simulation; rebuilt fresh at the start of each run
    network: Network,
    /// Accumulated history of the latest run
    record: SimulationRecord,
    /// Explicit random source for wiring and stimulation
    rng: StdRng,
}

impl Simulator {
    /// Create a new driver
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
        Ok(Self {
            config,
            network: Network::new(),
            record: SimulationRecord::new(),
            rng,
        })
    }

    /// Run a standard simulation for `max_timesteps` ticks
    ///
    /// Per tick: snapshot, scripted stimulation on even ticks, background
    /// noise, then one update pass over every neuron in index order.
    pub fn run_standard(&mut self, max_timesteps: usize) -> &SimulationRecord {
        log::info!("starting standard simulation: {} ticks", max_timesteps);
        self.record.clear();
        self.rebuild_network();

        for timestep in 0..max_timesteps {
            let mut cascade = CascadeState::new(self.network.neuron_count());

            self.record.record_snapshot(self.network.membrane_potentials());

            if timestep % 2 == 0 {
                let stimulated = self.rng.gen_range(0..NETWORK_SIZE);
                self.network.force_spike(NeuronId::from(stimulated), &mut cascade);
            }

            self.apply_background_activity(&mut cascade);
            self.run_update_pass(timestep, &mut cascade);
        }

        self.record.total_timesteps = max_timesteps;
        self.record.total_spikes = self.record.spike_events.len();
        log::info!(
            "standard simulation complete: {} spikes in {} ticks",
            self.record.total_spikes,
            self.record.total_timesteps
        );
        &self.record
    }

    /// Run a metabolic-dysfunction simulation under `condition`
    ///
    /// Identical bookkeeping to the standard run, but stimulation is a
    /// per-tick probability draw (0.5 before onset, then
    /// `max(0.1, 0.5 * atp_efficiency)`), and the perturbation step runs
    /// before the snapshot from the onset tick onward. There is no
    /// background-noise step in this mode.
    pub fn run_with_condition(
        &mut self,
        condition: &MetabolicCondition,
        max_timesteps: usize,
    ) -> &SimulationRecord {
        log::info!("running {} simulation: {} ticks", condition.name, max_timesteps);
        self.record.clear();
        self.rebuild_network();

        let mut dysfunction_phase = false;
        for timestep in 0..max_timesteps {
            if timestep == condition.onset_timestep && !dysfunction_phase {
                log::info!("{}: dysfunction onset at tick {}", condition.name, timestep);
                dysfunction_phase = true;
            }

            let mut cascade = CascadeState::new(self.network.neuron_count());

            if dysfunction_phase {
                self.apply_metabolic_dysfunction(condition, timestep, &mut cascade);
            }

            self.record.record_snapshot(self.network.membrane_potentials());

            let stimulation_probability = if dysfunction_phase {
                (0.5 * condition.atp_efficiency).max(0.1)
            } else {
                0.5
            };
            if self.rng.gen::<f32>() < stimulation_probability {
                let stimulated = self.rng.gen_range(0..NETWORK_SIZE);
                self.network.force_spike(NeuronId::from(stimulated), &mut cascade);
            }

            self.run_update_pass(timestep, &mut cascade);
        }

        self.record.total_timesteps = max_timesteps;
        self.record.total_spikes = self.record.spike_events.len();
        log::info!(
            "{} simulation complete: {} spikes in {} ticks",
            condition.name,
            self.record.total_spikes,
            self.record.total_timesteps
        );
        &self.record
    }

    /// The accumulated record of the latest run
    pub fn record(&self) -> &SimulationRecord {
        &self.record
    }

    /// Stability metrics over the latest run
    pub fn stability_metrics(&self) -> StabilityMetrics {
        StabilityMetrics::from_record(&self.record, NETWORK_SIZE)
    }

    /// The network under simulation
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Driver configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Build the fixed archetype lineup and wire a fresh random topology
    fn rebuild_network(&mut self) {
        let neurons = Archetype::standard_lineup()
            .iter()
            .map(|archetype| archetype.build())
            .collect();
        self.network = Network::with_neurons(neurons);

        for source in 0..NETWORK_SIZE {
            for _ in 0..self.config.connection_density {
                let target = self.rng.gen_range(0..NETWORK_SIZE);
                if target == source {
                    continue;
                }
                let dendrite_count = match self.network.neuron(NeuronId::from(target)) {
                    Ok(neuron) => neuron.dendrite_count(),
                    Err(_) => continue,
                };
                if dendrite_count == 0 {
                    continue;
                }

                let dendrite = self.rng.gen_range(0..dendrite_count);
                let weight = 1.5 + self.rng.gen::<f32>() * 3.0;
                let source_excitatory = self
                    .network
                    .neuron(NeuronId::from(source))
                    .map(|n| n.is_excitatory())
                    .unwrap_or(true);
                let inhibitory = if source_excitatory {
                    self.rng.gen_range(0..8) == 0
                } else {
                    true
                };

                // Capacity exhaustion silently drops the connection attempt
                self.network.connect_neurons(
                    NeuronId::from(source),
                    NeuronId::from(target),
                    dendrite,
                    weight,
                    inhibitory,
                );
            }
        }

        log::debug!(
            "wired network: {} neurons, {} synapses",
            self.network.neuron_count(),
            self.network.synapse_count()
        );
    }

    /// Background noise: two-stage draw per neuron, forcing sparse spikes
    fn apply_background_activity(&mut self, cascade: &mut CascadeState) {
        for neuron in 0..self.network.neuron_count() {
            if self.rng.gen::<f32>() < self.config.noise_probability
                && self.rng.gen::<f32>() < 0.25
            {
                self.network.force_spike(NeuronId::from(neuron), cascade);
            }
        }
    }

    /// One update pass over all neurons in fixed index order
    fn run_update_pass(&mut self, timestep: usize, cascade: &mut CascadeState) {
        for neuron in 0..self.network.neuron_count() {
            let id = NeuronId::from(neuron);
            if self.network.update_and_check_spike(id, cascade) {
                self.record.record_spike(timestep, id);
            }
        }
    }

    /// Scripted perturbation for one tick of the dysfunction phase
    fn apply_metabolic_dysfunction(
        &mut self,
        condition: &MetabolicCondition,
        timestep: usize,
        cascade: &mut CascadeState,
    ) {
        if timestep < condition.onset_timestep {
            return;
        }
        let time_factor = condition.time_factor(timestep - condition.onset_timestep);

        if condition.glucose_level < 50.0 && self.rng.gen_range(0..20) == 0 {
            if time_factor < 2.0 {
                log::info!("{}: reduced excitability", condition.name);
            } else if self.rng.gen_range(0..10) == 0 {
                let blocked = self.rng.gen_range(0..NETWORK_SIZE);
                self.network.force_spike(NeuronId::from(blocked), cascade);
                log::warn!("{}: depolarization block on N{}", condition.name, blocked);
            }
        }

        if condition.glucose_level > 250.0 && self.rng.gen_range(0..15) == 0 {
            for _ in 0..3 {
                let affected = self.rng.gen_range(0..NETWORK_SIZE);
                self.network.force_spike(NeuronId::from(affected), cascade);
            }
        }

        if condition.atp_efficiency < 0.2 && self.rng.gen_range(0..5) == 0 {
            for _ in 0..5 {
                let affected = self.rng.gen_range(0..NETWORK_SIZE);
                self.network.force_spike(NeuronId::from(affected), cascade);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(SimulatorConfig::default().validate().is_ok());

        let bad = SimulatorConfig::default().with_noise_probability(1.5);
        assert!(bad.validate().is_err());
        assert!(Simulator::new(bad).is_err());
    }

    #[test]
    fn test_network_rebuilt_per_run() {
        let mut sim = Simulator::new(SimulatorConfig::default().with_seed(7)).unwrap();
        sim.run_standard(5);
        assert_eq!(sim.network().neuron_count(), NETWORK_SIZE);
        assert!(sim.network().synapse_count() > 0);
        sim.network().validate().unwrap();
    }

    #[test]
    fn test_standard_run_record_shape() {
        let mut sim = Simulator::new(SimulatorConfig::default().with_seed(1234)).unwrap();
        let record = sim.run_standard(10);

        assert_eq!(record.total_timesteps, 10);
        assert_eq!(record.membrane_potentials.len(), 10);
        for row in &record.membrane_potentials {
            assert_eq!(row.len(), NETWORK_SIZE);
        }
        assert_eq!(record.network_activity.len(), 10);
        assert!(record.spike_events.iter().all(|e| e.timestep < 10));
        assert_eq!(record.total_spikes, record.spike_events.len());
    }

    #[test]
    fn test_same_seed_reproduces_record() {
        let mut a = Simulator::new(SimulatorConfig::default().with_seed(99)).unwrap();
        let mut b = Simulator::new(SimulatorConfig::default().with_seed(99)).unwrap();

        let record_a = a.run_standard(50).clone();
        let record_b = b.run_standard(50).clone();
        assert_eq!(record_a, record_b);
    }

    #[test]
    fn test_condition_run_record_shape() {
        let mut sim = Simulator::new(SimulatorConfig::default().with_seed(5)).unwrap();
        let mut condition = MetabolicCondition::hypoxia();
        condition.onset_timestep = 0;
        let record = sim.run_with_condition(&condition, 20);

        assert_eq!(record.total_timesteps, 20);
        assert_eq!(record.membrane_potentials.len(), 20);
        assert!(record.spike_events.iter().all(|e| e.timestep < 20));
    }

    #[test]
    fn test_onset_past_end_never_perturbs() {
        // Two very different conditions whose dysfunction phases never
        // start consume identical random streams, so the runs match.
        let mut hypo = MetabolicCondition::hypoglycemia();
        hypo.onset_timestep = 1000;
        let mut mito = MetabolicCondition::mitochondrial_dysfunction();
        mito.onset_timestep = 1000;

        let mut a = Simulator::new(SimulatorConfig::default().with_seed(31)).unwrap();
        let mut b = Simulator::new(SimulatorConfig::default().with_seed(31)).unwrap();

        let record_a = a.run_with_condition(&hypo, 50).clone();
        let record_b = b.run_with_condition(&mito, 50).clone();
        assert_eq!(record_a, record_b);
    }

    #[test]
    fn test_metrics_from_latest_run() {
        let mut sim = Simulator::new(SimulatorConfig::default().with_seed(77)).unwrap();
        sim.run_standard(100);
        let metrics = sim.stability_metrics();
        // A stimulated network settles near rest between spikes; the mean
        // stays within tens of millivolts of the homeostatic target.
        assert!(metrics.homeostatic_deviation.is_finite());
        assert!(metrics.coefficient_of_variation >= 0.0);
    }
}
