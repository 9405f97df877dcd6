pub mod settings;

// Re-export commonly used types
pub use settings::{
    load_simulation_settings, save_simulation_settings, SimulationSettings, SolverSettings,
};
