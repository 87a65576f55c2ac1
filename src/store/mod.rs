//! Transactional storage for employees and their attendance records.
//!
//! Records are grouped per employee into an [`EmployeeRecords`] book. Every
//! mutation of a book runs inside [`AttendanceStore::transaction`], which
//! serializes access per employee and commits the staged changes only when
//! the closure succeeds. Different employees never contend with each other.

mod memory;
mod records;

pub use memory::MemoryStore;
pub use records::EmployeeRecords;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Employee, EmployeeId, RequestId};

/// The two kinds of approval request, used to index request ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// A leave request.
    Leave,
    /// An overtime request.
    Overtime,
}

/// Row-level transactional store keyed by the unique constraints of each
/// record type.
pub trait AttendanceStore: Send + Sync {
    /// Adds a new employee with an empty book.
    ///
    /// Fails with `Conflict` when the id or the employee code is taken.
    fn insert_employee(&self, employee: Employee) -> EngineResult<()>;

    /// Replaces an existing employee.
    fn update_employee(&self, employee: Employee) -> EngineResult<()>;

    /// Gets an employee by id.
    fn employee(&self, id: EmployeeId) -> EngineResult<Employee>;

    /// All employees, active or not.
    fn employees(&self) -> Vec<Employee>;

    /// Allocates a new identifier. Identifiers are never reused.
    fn next_id(&self) -> u64;

    /// Records which employee owns a request.
    fn index_request(&self, kind: RequestKind, id: RequestId, owner: EmployeeId);

    /// Finds the employee owning a request.
    fn request_owner(&self, kind: RequestKind, id: RequestId) -> EngineResult<EmployeeId>;

    /// Runs `f` against a staged copy of the employee's book.
    ///
    /// The copy replaces the stored book only when `f` returns `Ok`; on error
    /// nothing is written. Calls for the same employee are serialized.
    fn transaction<T, F>(&self, employee: EmployeeId, f: F) -> EngineResult<T>
    where
        F: FnOnce(&mut EmployeeRecords) -> EngineResult<T>;

    /// A consistent copy of the employee's book for reading.
    fn snapshot(&self, employee: EmployeeId) -> EngineResult<EmployeeRecords>;
}
