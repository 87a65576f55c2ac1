//! Attendance and payroll engine.
//!
//! This crate tracks employee shift attendance (check-in/check-out with
//! lateness and early-leave rules), leave and overtime requests with their
//! approval lifecycle and leave balances, and computes monthly salary
//! records and evaluations from that attendance.

#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod payroll;
pub mod store;
