use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub locator: LocatorConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocatorConfig {
    /// Lookup tolerance in seconds when matching the buffer end to a fragment
    #[serde(default = "default_max_frag_lookup_tolerance")]
    pub max_frag_lookup_tolerance: f64,

    /// Use program date times to realign after a discontinuity or seek
    #[serde(default = "default_use_program_date_time")]
    pub use_program_date_time: bool,
}

fn default_max_frag_lookup_tolerance() -> f64 {
    0.25
}

fn default_use_program_date_time() -> bool {
    true
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            max_frag_lookup_tolerance: default_max_frag_lookup_tolerance(),
            use_program_date_time: default_use_program_date_time(),
        }
    }
}
