use std::fs;
use std::path::PathBuf;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

const SIMULATION_CONFIG_FILE: &str = "simulation.toml";

// =============================================================================
// Simulation Configuration
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    pub num_solver_iterations: usize,
    pub max_ccd_substeps: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            num_solver_iterations: 4,
            max_ccd_substeps: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// World gravity in m/s^2.
    pub gravity: [f32; 3],
    /// Fixed timestep for each world advance, in seconds.
    pub timestep: f32,
    pub solver: SolverSettings,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            timestep: 1.0 / 60.0,
            solver: SolverSettings::default(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sceneforge")
        .map(|dirs| dirs.config_dir().join(SIMULATION_CONFIG_FILE))
}

/// Load simulation settings from the user config directory, falling back to
/// defaults if the file is missing or unreadable.
pub fn load_simulation_settings() -> SimulationSettings {
    let Some(path) = config_path() else {
        return SimulationSettings::default();
    };

    match fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                SimulationSettings::default()
            }
        },
        Err(_) => SimulationSettings::default(),
    }
}

/// Persist simulation settings to the user config directory.
pub fn save_simulation_settings(settings: &SimulationSettings) -> anyhow::Result<()> {
    let path = config_path()
        .ok_or_else(|| anyhow::anyhow!("No valid config directory for this platform"))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(settings)?;
    fs::write(&path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = SimulationSettings::default();
        assert_eq!(settings.gravity[1], -9.81);
        assert!(settings.timestep > 0.0);
        assert!(settings.solver.num_solver_iterations > 0);
    }

    #[test]
    fn settings_toml_round_trip() {
        let settings = SimulationSettings {
            gravity: [0.0, -3.7, 0.0],
            timestep: 1.0 / 120.0,
            solver: SolverSettings::default(),
        };
        let text = toml::to_string_pretty(&settings).unwrap();
        let back: SimulationSettings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
