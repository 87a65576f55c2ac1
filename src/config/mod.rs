//! Reference data and runtime settings.
//!
//! Reference data (departments, positions, working shifts) is loaded once
//! from YAML files and shared read-only. Server settings come from the
//! environment.
//!
//! # Example
//!
//! ```no_run
//! use attendance_payroll::config::ConfigLoader;
//!
//! let reference = ConfigLoader::load("./config/reference").unwrap();
//! println!("Loaded reference data for {}", reference.company().name);
//! ```

mod loader;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use settings::Settings;
pub use types::{CompanyMetadata, DepartmentsConfig, PositionsConfig, ReferenceData, ShiftsConfig};
