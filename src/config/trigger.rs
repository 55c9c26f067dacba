use serde::Deserialize;

use crate::trigger::{JetTriggerConfig, ParticleTrigger};

/// Optional event filters applied by the host before reconstruction.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TriggerConfig {
    pub particle: Option<ParticleTrigger>,
    pub jet: Option<JetTriggerConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_deserializes() {
        let config: TriggerConfig = serde_json::from_str(
            r#"{"particle": {"particle_ids": [11, -11],
                             "parent_ids": [],
                             "pt": {"low": 1.5, "high": null},
                             "p": {"low": null, "high": null},
                             "eta": {"low": null, "high": null},
                             "abs_eta": {"low": null, "high": 1.1},
                             "pz": {"low": null, "high": null}}}"#,
        )
        .unwrap();
        let particle = config.particle.unwrap();
        assert_eq!(particle.particle_ids, vec![11, -11]);
        assert_eq!(particle.pt.low, Some(1.5));
        assert!(config.jet.is_none());
    }
}
