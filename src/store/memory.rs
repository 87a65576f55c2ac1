//! In-memory implementation of [`AttendanceStore`].

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeId, RequestId};

use super::{AttendanceStore, EmployeeRecords, RequestKind};

/// Keeps everything in process memory.
///
/// Each employee's book sits behind its own mutex, so transactions for
/// different employees run in parallel while transactions for the same
/// employee are serialized.
///
/// A transaction stages its changes on a full clone of the employee's book,
/// so its cost grows with that employee's history (every timesheet and
/// request ever recorded).
#[derive(Debug, Default)]
pub struct MemoryStore {
    employees: RwLock<HashMap<EmployeeId, Employee>>,
    books: RwLock<HashMap<EmployeeId, Arc<Mutex<EmployeeRecords>>>>,
    request_owners: RwLock<HashMap<(RequestKind, RequestId), EmployeeId>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn book(&self, employee_id: EmployeeId) -> EngineResult<Arc<Mutex<EmployeeRecords>>> {
        self.books
            .read()
            .get(&employee_id)
            .cloned()
            .ok_or(EngineError::EmployeeNotFound { employee_id })
    }
}

impl AttendanceStore for MemoryStore {
    fn insert_employee(&self, employee: Employee) -> EngineResult<()> {
        let mut employees = self.employees.write();
        if employees.contains_key(&employee.id) {
            return Err(EngineError::Conflict {
                message: format!("employee {} already exists", employee.id),
            });
        }
        if employees
            .values()
            .any(|e| e.employee_code == employee.employee_code)
        {
            return Err(EngineError::Conflict {
                message: format!("employee code {} is taken", employee.employee_code),
            });
        }

        self.books
            .write()
            .insert(employee.id, Arc::new(Mutex::new(EmployeeRecords::default())));
        employees.insert(employee.id, employee);
        Ok(())
    }

    fn update_employee(&self, employee: Employee) -> EngineResult<()> {
        let mut employees = self.employees.write();
        match employees.get_mut(&employee.id) {
            Some(existing) => {
                *existing = employee;
                Ok(())
            }
            None => Err(EngineError::EmployeeNotFound {
                employee_id: employee.id,
            }),
        }
    }

    fn employee(&self, id: EmployeeId) -> EngineResult<Employee> {
        self.employees
            .read()
            .get(&id)
            .cloned()
            .ok_or(EngineError::EmployeeNotFound { employee_id: id })
    }

    fn employees(&self) -> Vec<Employee> {
        let mut employees: Vec<Employee> = self.employees.read().values().cloned().collect();
        employees.sort_by_key(|e| e.id);
        employees
    }

    fn next_id(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn index_request(&self, kind: RequestKind, id: RequestId, owner: EmployeeId) {
        self.request_owners.write().insert((kind, id), owner);
    }

    fn request_owner(&self, kind: RequestKind, id: RequestId) -> EngineResult<EmployeeId> {
        self.request_owners
            .read()
            .get(&(kind, id))
            .copied()
            .ok_or(EngineError::RequestNotFound { request_id: id })
    }

    fn transaction<T, F>(&self, employee: EmployeeId, f: F) -> EngineResult<T>
    where
        F: FnOnce(&mut EmployeeRecords) -> EngineResult<T>,
    {
        let book = self.book(employee)?;
        let mut records = book.lock();
        let mut staged = records.clone();
        let value = f(&mut staged)?;
        *records = staged;
        Ok(value)
    }

    fn snapshot(&self, employee: EmployeeId) -> EngineResult<EmployeeRecords> {
        let book = self.book(employee)?;
        let records = book.lock();
        Ok(records.clone())
    }
}
