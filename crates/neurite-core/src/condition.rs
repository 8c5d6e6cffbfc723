//! Metabolic dysfunction conditions
//!
//! A condition is a literal perturbation profile consumed by the driver:
//! glucose and ATP levels gate scripted spike-forcing events, and the
//! progressive flag scales their severity over time. The four named
//! constructors are fixed parameter tuples, not derived logic.

/// A scripted metabolic perturbation profile
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetabolicCondition {
    /// Human-readable condition name
    pub name: String,
    /// Blood glucose (mg/dL); < 50 and > 250 trigger dysfunction events
    pub glucose_level: f32,
    /// ATP production efficiency in [0, 1]; < 0.2 triggers spike cascades
    pub atp_efficiency: f32,
    /// Na+/K+ pump function in [0, 1]
    pub ion_pump_function: f32,
    /// Neurotransmitter synthesis capacity in [0, 1]
    pub neurotransmitter_synthesis: f32,
    /// Membrane integrity in [0, 1]
    pub membrane_integrity: f32,
    /// Oxidative stress level
    pub oxidative_stress: f32,
    /// Whether severity ramps up after onset
    pub progressive: bool,
    /// Tick at which the dysfunction phase begins
    pub onset_timestep: usize,
}

impl MetabolicCondition {
    /// Severe hypoglycemia
    pub fn hypoglycemia() -> Self {
        Self {
            name: "Severe Hypoglycemia".to_string(),
            glucose_level: 35.0,
            atp_efficiency: 0.3,
            ion_pump_function: 0.4,
            neurotransmitter_synthesis: 0.5,
            membrane_integrity: 0.8,
            oxidative_stress: 2.5,
            progressive: true,
            onset_timestep: 1000,
        }
    }

    /// Diabetic ketoacidosis
    pub fn diabetic_ketoacidosis() -> Self {
        Self {
            name: "Diabetic Ketoacidosis".to_string(),
            glucose_level: 350.0,
            atp_efficiency: 0.6,
            ion_pump_function: 0.3,
            neurotransmitter_synthesis: 0.4,
            membrane_integrity: 0.6,
            oxidative_stress: 3.5,
            progressive: true,
            onset_timestep: 800,
        }
    }

    /// Cerebral hypoxia
    pub fn hypoxia() -> Self {
        Self {
            name: "Cerebral Hypoxia".to_string(),
            glucose_level: 85.0,
            atp_efficiency: 0.1,
            ion_pump_function: 0.2,
            neurotransmitter_synthesis: 0.3,
            membrane_integrity: 0.5,
            oxidative_stress: 4.0,
            progressive: true,
            onset_timestep: 500,
        }
    }

    /// Mitochondrial dysfunction
    pub fn mitochondrial_dysfunction() -> Self {
        Self {
            name: "Mitochondrial Dysfunction".to_string(),
            glucose_level: 90.0,
            atp_efficiency: 0.4,
            ion_pump_function: 0.6,
            neurotransmitter_synthesis: 0.7,
            membrane_integrity: 0.7,
            oxidative_stress: 3.0,
            progressive: false,
            onset_timestep: 200,
        }
    }

    /// The full study set, in study order
    pub fn study_set() -> Vec<Self> {
        vec![
            Self::hypoglycemia(),
            Self::diabetic_ketoacidosis(),
            Self::hypoxia(),
            Self::mitochondrial_dysfunction(),
        ]
    }

    /// Severity scale at a given number of ticks past onset
    ///
    /// Progressive conditions ramp linearly from 1.0 by 0.001 per tick,
    /// capped at 3.0; non-progressive conditions stay at 1.0.
    pub fn time_factor(&self, ticks_past_onset: usize) -> f32 {
        if self.progressive {
            (1.0 + ticks_past_onset as f32 * 0.001).min(3.0)
        } else {
            1.0
        }
    }
}
