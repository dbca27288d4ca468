//! Generator configuration.

use serde::{Deserialize, Serialize};

/// Default probability of removing one random component from a template.
pub const DEFAULT_REMOVAL_PROBABILITY: f64 = 0.05;

/// Static configuration shared by all generation requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Seed for the generator's random stream. Two generators built with
    /// the same seed and the same requests produce identical corpora.
    pub seed: u64,

    /// What to emit when a label is null (the trainer needs a concrete
    /// class name to predict).
    pub null_target: String,

    /// Hand-curated list of ten common locales ("mini.10" locale schema).
    pub mini10_locales: Vec<String>,

    /// Upper bound on compose/render/verify attempts per emitted example.
    /// The sample space is practically always renderable; the cap exists
    /// so a pathological range/locale combination fails loudly instead of
    /// spinning forever.
    pub max_attempts_per_example: u32,

    /// Upper bound on retries when sampling a valid calendar date from
    /// independently drawn fields.
    pub max_value_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            null_target: "NULL".to_string(),
            mini10_locales: vec![
                "en_US".to_string(),
                "en_GB".to_string(),
                "de_DE".to_string(),
                "fr_CH".to_string(),
                "sv_SE".to_string(),
                "es_ES".to_string(),
                "nn_NO".to_string(),
                "it_IT".to_string(),
                "nl_NL".to_string(),
                "pt_PT".to_string(),
            ],
            max_attempts_per_example: 1_000,
            max_value_attempts: 10_000,
        }
    }
}
