/// Runtime settings read from the environment
pub mod settings;

/// Product and employee seed data loaded from config.toml
pub mod seed;

pub use seed::{SeedConfig, load_seed_config};
pub use settings::Settings;
