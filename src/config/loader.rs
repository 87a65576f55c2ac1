//! Reference data loading.
//!
//! This module provides the [`ConfigLoader`] type for loading the company's
//! reference tables from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{CompanyMetadata, DepartmentsConfig, PositionsConfig, ReferenceData, ShiftsConfig};

/// Loads reference data from a directory of YAML files.
///
/// # Directory Structure
///
/// ```text
/// config/reference/
/// ├── company.yaml      # Company metadata
/// ├── departments.yaml  # Department codes and names
/// ├── positions.yaml    # Positions with their pay rates
/// └── shifts.yaml       # The MORNING and AFTERNOON shift schedule
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_payroll::config::ConfigLoader;
/// use attendance_payroll::models::ShiftType;
///
/// let reference = ConfigLoader::load("./config/reference")?;
/// let morning = reference.shift(ShiftType::Morning)?;
/// println!("Morning shift starts at {}", morning.start_time);
/// # Ok::<(), attendance_payroll::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads reference data from the specified directory.
    ///
    /// Fails with `ConfigNotFound` when a file is missing and with
    /// `ConfigParseError` when a file is malformed or inconsistent
    /// (duplicate codes, a shift ending before it starts).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<ReferenceData> {
        let path = path.as_ref();

        let company = Self::load_yaml::<CompanyMetadata>(&path.join("company.yaml"))?;

        let departments_path = path.join("departments.yaml");
        let departments = Self::load_yaml::<DepartmentsConfig>(&departments_path)?.departments;
        Self::check_unique(
            &departments_path,
            departments.iter().map(|d| d.code.clone()),
        )?;

        let positions_path = path.join("positions.yaml");
        let positions = Self::load_yaml::<PositionsConfig>(&positions_path)?.positions;
        Self::check_unique(&positions_path, positions.iter().map(|p| p.code.clone()))?;

        let shifts_path = path.join("shifts.yaml");
        let shifts = Self::load_yaml::<ShiftsConfig>(&shifts_path)?.shifts;
        Self::check_unique(&shifts_path, shifts.iter().map(|s| s.shift_type.to_string()))?;
        if let Some(shift) = shifts.iter().find(|s| s.end_time < s.start_time) {
            return Err(EngineError::ConfigParseError {
                path: shifts_path.display().to_string(),
                message: format!("{} shift ends before it starts", shift.shift_type),
            });
        }

        Ok(ReferenceData::new(company, departments, positions, shifts))
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_unique(path: &Path, codes: impl Iterator<Item = String>) -> EngineResult<()> {
        let mut seen = HashSet::new();
        for code in codes {
            if !seen.insert(code.clone()) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate entry '{}'", code),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftType;
    use chrono::NaiveTime;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/reference"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let reference = result.unwrap();
        assert_eq!(reference.company().currency, "VND");
    }

    #[test]
    fn test_shift_schedule() {
        let reference = ConfigLoader::load(config_path()).unwrap();

        let morning = reference.shift(ShiftType::Morning).unwrap();
        assert_eq!(morning.start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(morning.end_time, NaiveTime::from_hms_opt(12, 0, 0).unwrap());

        let afternoon = reference.shift(ShiftType::Afternoon).unwrap();
        assert_eq!(
            afternoon.start_time,
            NaiveTime::from_hms_opt(13, 0, 0).unwrap()
        );
        assert_eq!(afternoon.end_time, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    }

    #[test]
    fn test_position_rates() {
        let reference = ConfigLoader::load(config_path()).unwrap();

        let position = reference.position("DEV").unwrap();
        assert_eq!(position.rate_base, dec("50000.00"));
        assert_eq!(position.rate_insufficient, dec("40000.00"));
        assert_eq!(position.rate_overtime, dec("75000.00"));
        assert_eq!(position.attendance_bonus, dec("500000.00"));
    }

    #[test]
    fn test_departments_loaded() {
        let reference = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(reference.department("ENG").unwrap().name, "Engineering");
        assert_eq!(reference.department("HR").unwrap().name, "Human Resources");
    }

    #[test]
    fn test_load_missing_directory_returns_not_found() {
        let result = ConfigLoader::load("./config/does-not-exist");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.ends_with("company.yaml"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }
}
