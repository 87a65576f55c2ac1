//! Reference data types.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML reference data files and the [`ReferenceData`] aggregate the engine
//! reads from.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{Department, Employee, EmployeeSummary, Position, ShiftType, WorkingShift};

/// Metadata about the company the reference data belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyMetadata {
    /// Company name.
    pub name: String,
    /// Currency code salaries are expressed in.
    pub currency: String,
}

/// Structure of `departments.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentsConfig {
    /// All departments.
    pub departments: Vec<Department>,
}

/// Structure of `positions.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionsConfig {
    /// All positions with their rates.
    pub positions: Vec<Position>,
}

/// Structure of `shifts.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftsConfig {
    /// The working shift schedule.
    pub shifts: Vec<WorkingShift>,
}

/// Read-only reference tables: departments, positions and the shift schedule.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    company: CompanyMetadata,
    departments: HashMap<String, Department>,
    positions: HashMap<String, Position>,
    shifts: HashMap<ShiftType, WorkingShift>,
}

impl ReferenceData {
    /// Creates reference data from its component parts.
    pub fn new(
        company: CompanyMetadata,
        departments: Vec<Department>,
        positions: Vec<Position>,
        shifts: Vec<WorkingShift>,
    ) -> Self {
        Self {
            company,
            departments: departments
                .into_iter()
                .map(|d| (d.code.clone(), d))
                .collect(),
            positions: positions.into_iter().map(|p| (p.code.clone(), p)).collect(),
            shifts: shifts.into_iter().map(|s| (s.shift_type, s)).collect(),
        }
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        &self.company
    }

    /// Gets a department by its code.
    pub fn department(&self, code: &str) -> EngineResult<&Department> {
        self.departments
            .get(code)
            .ok_or_else(|| EngineError::DepartmentNotFound {
                code: code.to_string(),
            })
    }

    /// Gets a position by its code.
    pub fn position(&self, code: &str) -> EngineResult<&Position> {
        self.positions
            .get(code)
            .ok_or_else(|| EngineError::PositionNotFound {
                code: code.to_string(),
            })
    }

    /// Gets the working shift of a type.
    pub fn shift(&self, shift_type: ShiftType) -> EngineResult<&WorkingShift> {
        self.shifts
            .get(&shift_type)
            .ok_or(EngineError::ShiftNotFound { shift_type })
    }

    /// Returns the display name of a department, or the code when unknown.
    pub fn department_name(&self, code: &str) -> String {
        self.departments
            .get(code)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| code.to_string())
    }

    /// The reporting summary of an employee, with the department's name.
    pub fn summarize(&self, employee: &Employee) -> EmployeeSummary {
        EmployeeSummary {
            id: employee.id,
            employee_code: employee.employee_code.clone(),
            full_name: employee.full_name.clone(),
            department: self.department_name(&employee.department_code),
        }
    }
}
