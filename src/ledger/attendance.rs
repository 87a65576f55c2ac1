//! Shift and overtime check-in/check-out.

use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeeId, PayMonth, ShiftType, TimeSheet, TimesheetKey, TimesheetStatus, TimesheetView,
};
use crate::store::{AttendanceStore, EmployeeRecords};

use super::AttendanceLedger;
use super::policy::{self, EARLY_LEAVE_LIMIT_MINUTES, EARLY_LEAVE_QUOTA};

/// Materializes the leave balance and monthly payroll shells that every
/// attendance row implies.
fn ensure_period_records(records: &mut EmployeeRecords, employee_id: EmployeeId, now: NaiveDateTime) {
    records.ensure_leave_balance(employee_id, now.year());
    records.ensure_monthly_records(employee_id, PayMonth::of(now.date()));
}

impl<S: AttendanceStore> AttendanceLedger<S> {
    /// Checks an employee in to a regular shift.
    ///
    /// Rejects closed days, unknown shifts and times outside the shift
    /// window. The row for `(employee, date, shift)` is created on the first
    /// check-in; a second check-in fails with `AlreadyCheckedIn`. A check-in
    /// more than 15 minutes after shift start is classified `LATE`.
    pub fn check_in(
        &self,
        employee_id: EmployeeId,
        shift_type: ShiftType,
        now: NaiveDateTime,
    ) -> EngineResult<TimesheetView> {
        let date = now.date();
        let time = now.time();

        if shift_type.is_closed_on(date) {
            return Err(EngineError::ClosedDay { date, shift_type });
        }
        let shift = self.reference.shift(shift_type)?;
        if !shift.window_contains(time) {
            return Err(EngineError::OutsideWindow {
                shift_type,
                time,
                start: shift.start_time,
                end: shift.end_time,
            });
        }

        let key = TimesheetKey::shift(date, shift_type);
        let view = self.store.transaction(employee_id, |records| {
            ensure_period_records(records, employee_id, now);

            if records.timesheet(&key).is_none() {
                records.insert_timesheet(TimeSheet::for_shift(employee_id, date, shift_type))?;
            }
            let sheet = records
                .timesheet_mut(&key)
                .ok_or(EngineError::NotCheckedIn { employee_id, date })?;
            if sheet.check_in_time.is_some() {
                return Err(EngineError::AlreadyCheckedIn { employee_id, date });
            }

            sheet.check_in_time = Some(time);
            sheet.status = policy::check_in_status(shift, time);
            Ok(TimesheetView::from(&*sheet))
        })?;

        debug!(
            employee_id = %employee_id,
            shift = %shift_type,
            status = %view.status,
            "Checked in"
        );
        Ok(view)
    }

    /// Checks an employee out of a regular shift.
    ///
    /// The check-out may be at most 30 minutes before shift end, measured to
    /// the second. Any check-out is refused once the employee already has two
    /// other `EARLY_LEAVE` rows this month, whatever its own timing. A `LATE`
    /// row stays `LATE`; otherwise the row becomes `EARLY_LEAVE` when leaving
    /// before shift end and `PRESENT` when not.
    pub fn check_out(
        &self,
        employee_id: EmployeeId,
        shift_type: ShiftType,
        now: NaiveDateTime,
    ) -> EngineResult<TimesheetView> {
        let date = now.date();
        let time = now.time();
        let shift = self.reference.shift(shift_type)?;
        let seconds_early = policy::seconds_early(shift, time);

        let key = TimesheetKey::shift(date, shift_type);
        let view = self.store.transaction(employee_id, |records| {
            let early_leave_count = records
                .timesheets_in(PayMonth::of(date))
                .filter(|s| s.key() != key && s.status == TimesheetStatus::EarlyLeave)
                .count();

            let sheet = records
                .timesheet_mut(&key)
                .filter(|s| s.check_in_time.is_some())
                .ok_or(EngineError::NotCheckedIn { employee_id, date })?;
            if sheet.check_out_time.is_some() {
                return Err(EngineError::AlreadyCheckedOut { employee_id, date });
            }
            if policy::exceeds_early_leave_limit(seconds_early) {
                return Err(EngineError::EarlyLeaveTooLarge {
                    minutes_early: policy::minutes_early_rounded_up(seconds_early),
                    limit: EARLY_LEAVE_LIMIT_MINUTES,
                });
            }
            if early_leave_count >= EARLY_LEAVE_QUOTA {
                return Err(EngineError::EarlyLeaveQuotaExceeded {
                    employee_id,
                    count: early_leave_count,
                });
            }

            sheet.check_out_time = Some(time);
            sheet.status = policy::check_out_status(sheet.status, seconds_early);
            Ok(TimesheetView::from(&*sheet))
        })?;

        debug!(
            employee_id = %employee_id,
            shift = %shift_type,
            status = %view.status,
            seconds_early,
            "Checked out"
        );
        Ok(view)
    }

    /// Starts an overtime session.
    ///
    /// Requires an approved overtime request for the date. The overtime row
    /// has no shift and stays `INCOMPLETE` until check-out.
    pub fn overtime_check_in(
        &self,
        employee_id: EmployeeId,
        now: NaiveDateTime,
    ) -> EngineResult<TimesheetView> {
        let date = now.date();
        let key = TimesheetKey::overtime(date);

        let view = self.store.transaction(employee_id, |records| {
            if !records.approved_overtime_on(date) {
                return Err(EngineError::OvertimeNotApproved { employee_id, date });
            }
            ensure_period_records(records, employee_id, now);

            if records.timesheet(&key).is_none() {
                records.insert_timesheet(TimeSheet::for_overtime(employee_id, date))?;
            }
            let sheet = records
                .timesheet_mut(&key)
                .ok_or(EngineError::NotCheckedIn { employee_id, date })?;
            if sheet.check_in_time.is_some() {
                return Err(EngineError::AlreadyCheckedIn { employee_id, date });
            }

            sheet.check_in_time = Some(now.time());
            Ok(TimesheetView::from(&*sheet))
        })?;

        debug!(employee_id = %employee_id, date = %date, "Overtime checked in");
        Ok(view)
    }

    /// Ends an overtime session, recording its length in hours.
    pub fn overtime_check_out(
        &self,
        employee_id: EmployeeId,
        now: NaiveDateTime,
    ) -> EngineResult<TimesheetView> {
        let date = now.date();
        let time = now.time();
        let key = TimesheetKey::overtime(date);

        let view = self.store.transaction(employee_id, |records| {
            if !records.approved_overtime_on(date) {
                return Err(EngineError::OvertimeNotApproved { employee_id, date });
            }

            let sheet = records
                .timesheet_mut(&key)
                .filter(|s| s.check_in_time.is_some())
                .ok_or(EngineError::NotCheckedIn { employee_id, date })?;
            if sheet.check_out_time.is_some() {
                return Err(EngineError::AlreadyCheckedOut { employee_id, date });
            }
            let check_in = sheet
                .check_in_time
                .ok_or(EngineError::NotCheckedIn { employee_id, date })?;

            sheet.check_out_time = Some(time);
            sheet.overtime_hours = policy::overtime_hours(check_in, time);
            sheet.status = TimesheetStatus::Present;
            Ok(TimesheetView::from(&*sheet))
        })?;

        debug!(
            employee_id = %employee_id,
            date = %date,
            overtime_hours = %view.overtime_hours,
            "Overtime checked out"
        );
        Ok(view)
    }
}
