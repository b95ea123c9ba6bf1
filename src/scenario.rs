//! Scenario files: a configuration plus the bodies to start with.
//!
//! ```json
//! {
//!   "config": { "gravity": 40.0, "decay": true },
//!   "bodies": [
//!     { "pos": [400, 400], "vel": [0, 0], "radius": 30, "mass": 2000 },
//!     { "pos": [600, 400], "vel": [0, 40], "radius": 8, "mass": 20, "color": "green" }
//!   ]
//! }
//! ```

use crate::body::BodySpec;
use crate::config::SimConfig;
use crate::error::Result;
use crate::simulation::Simulation;

use log::info;
use serde::{Deserialize, Serialize};

use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: SimConfig,
    #[serde(default)]
    pub bodies: Vec<BodySpec>,
}

impl Scenario {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let scenario = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        info!(
            "loaded scenario {} with {} bodies",
            path.display(),
            scenario.bodies.len()
        );
        Ok(scenario)
    }

    /// Validates the configuration and spawns every body at frame 0.
    pub fn build(&self) -> Result<Simulation> {
        Simulation::with_bodies(self.config.clone(), &self.bodies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::TrailColor;
    use crate::error::SimError;

    #[test]
    fn parses_and_builds() {
        let scenario = Scenario::from_json_str(
            r#"{
                "config": { "gravity": 40.0, "decay": true },
                "bodies": [
                    { "pos": [400, 400], "radius": 30, "mass": 2000 },
                    { "pos": [600, 400], "vel": [0, 40], "radius": 8, "mass": 20, "color": "green" }
                ]
            }"#,
        )
        .unwrap();

        let sim = scenario.build().unwrap();
        assert_eq!(sim.bodies.len(), 2);
        assert_eq!(sim.gravity(), 40.0);
        assert!(sim.config.decay);
        assert_eq!(sim.bodies[0].color(), TrailColor::Pink);
        assert_eq!(sim.bodies[1].vel().y, 40.0);
    }

    #[test]
    fn invalid_body_fails_build() {
        let scenario = Scenario::from_json_str(
            r#"{ "bodies": [ { "pos": [0, 0], "radius": -1, "mass": 5 } ] }"#,
        )
        .unwrap();
        assert!(matches!(scenario.build(), Err(SimError::InvalidSpawn(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Scenario::from_path("/nonexistent/scenario.json").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
