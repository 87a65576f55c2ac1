//! Performance benchmarks for the attendance and payroll engine.
//!
//! - Salary rules for one employee-month
//! - Check-in through the HTTP router
//! - Monthly payroll batch over 100 and 1000 employees with a full month of
//!   attendance each
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use attendance_payroll::api::{AppState, create_router};
use attendance_payroll::clock::FixedClock;
use attendance_payroll::config::{ConfigLoader, ReferenceData};
use attendance_payroll::ledger::{AttendanceLedger, EmployeeRegistration};
use attendance_payroll::models::{AuditTrace, ShiftType};
use attendance_payroll::payroll::{
    AnnualBonus, MonthlyAttendance, PayrollEngine, PayrollFilter, calculate_salary,
};
use attendance_payroll::store::MemoryStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_reference() -> ReferenceData {
    ConfigLoader::load("./config/reference").expect("Failed to load config")
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0).expect("valid time")
}

/// Weekdays of January 2026.
fn working_days() -> Vec<NaiveDate> {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .expect("valid date")
        .iter_days()
        .take_while(|date| date.month() == 1)
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

/// Builds a ledger with `employees` staff, each working both shifts on every
/// weekday of January 2026.
fn populated_engine(employees: usize) -> PayrollEngine<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let reference = Arc::new(load_reference());
    let ledger = AttendanceLedger::new(Arc::clone(&store), Arc::clone(&reference));
    let days = working_days();
    let departments = ["ENG", "HR", "OPS"];

    for i in 0..employees {
        let employee = ledger
            .register_employee(
                EmployeeRegistration {
                    full_name: format!("Bench Employee {}", i),
                    department_code: departments[i % departments.len()].to_string(),
                    position_code: "DEV".to_string(),
                    join_date: None,
                },
                days[0],
            )
            .expect("registration succeeds");

        for &date in &days {
            ledger
                .check_in(employee.id, ShiftType::Morning, at(date, 8, 0))
                .expect("check-in succeeds");
            ledger
                .check_out(employee.id, ShiftType::Morning, at(date, 12, 0))
                .expect("check-out succeeds");
            ledger
                .check_in(employee.id, ShiftType::Afternoon, at(date, 13, 5))
                .expect("check-in succeeds");
            ledger
                .check_out(employee.id, ShiftType::Afternoon, at(date, 17, 0))
                .expect("check-out succeeds");
        }
    }

    PayrollEngine::new(store, reference)
}

/// Benchmark: salary rules for one employee-month.
fn bench_salary_rules(c: &mut Criterion) {
    let reference = load_reference();
    let position = reference.position("DEV").expect("position exists").clone();
    let attendance = MonthlyAttendance {
        regular_hours: Decimal::new(17_600, 2),
        overtime_hours: Decimal::new(3_050, 2),
        leave_days: Decimal::new(15, 1),
    };

    c.bench_function("salary_rules", |b| {
        b.iter(|| {
            let mut trace = AuditTrace::default();
            black_box(calculate_salary(
                black_box(&attendance),
                &position,
                AnnualBonus::Due { used_leaves: 2 },
                &mut trace,
            ))
        })
    });
}

/// Benchmark: check-in through the router, one fresh employee per iteration.
fn bench_http_check_in(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("runtime");
    let store = Arc::new(MemoryStore::new());
    let now = at(NaiveDate::from_ymd_opt(2026, 1, 14).expect("valid date"), 8, 0);
    let state = AppState::new(
        Arc::clone(&store),
        load_reference(),
        Arc::new(FixedClock::new(now)),
    );
    let ledger = state.ledger().clone();
    let router = create_router(state);

    c.bench_function("http_check_in", |b| {
        b.to_async(&rt).iter(|| async {
            let employee = ledger
                .register_employee(
                    EmployeeRegistration {
                        full_name: "Bench".to_string(),
                        department_code: "ENG".to_string(),
                        position_code: "DEV".to_string(),
                        join_date: None,
                    },
                    now.date(),
                )
                .expect("registration succeeds");
            let body = serde_json::json!({
                "employee_id": employee.id,
                "shift_type": "MORNING"
            })
            .to_string();
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/attendance/check-in")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body))
                        .expect("valid request"),
                )
                .await
                .expect("router responds");
            black_box(response)
        })
    });
}

/// Benchmark: monthly payroll batch.
fn bench_monthly_payroll(c: &mut Criterion) {
    let filter = PayrollFilter {
        department: None,
        month: Some(1),
        year: Some(2026),
    };
    let today = NaiveDate::from_ymd_opt(2026, 1, 31).expect("valid date");

    let mut group = c.benchmark_group("monthly_payroll");
    group.sample_size(10);
    for employees in [100usize, 1000] {
        let engine = populated_engine(employees);
        group.throughput(Throughput::Elements(employees as u64));
        group.bench_with_input(BenchmarkId::from_parameter(employees), &engine, |b, engine| {
            b.iter(|| {
                black_box(
                    engine
                        .run_monthly_payroll(&filter, today)
                        .expect("payroll succeeds"),
                )
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_salary_rules,
    bench_http_check_in,
    bench_monthly_payroll
);
criterion_main!(benches);
