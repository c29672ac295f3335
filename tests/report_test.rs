//! Report pipeline tests: metric computation through the service, and the
//! three renderers producing their formats.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use attendly::domain::{AttendanceStatus, ReportFilter, ReportRow};
use attendly::infra::repositories::{
    MockAttendanceRepository, MockDepartmentRepository, MockEmployeeRepository,
    MockHolidayRepository, MockUserRepository,
};
use attendly::reports::{self, ReportFormat, ReportTable};
use attendly::services::{ReportGenerator, ReportService};

use common::{date, test_attendance, test_department, test_employee, test_user, TestUnitOfWork};

fn sample_rows() -> Vec<ReportRow> {
    vec![
        ReportRow {
            employee_code: "EMP-0001".to_string(),
            full_name: "Alex Morgan".to_string(),
            department: "Engineering".to_string(),
            working_days: 20,
            days_present: 18,
            days_absent: 1,
            days_on_leave: 1,
            attendance_percent: 90.0,
            average_work_hours: 7.9,
            grade: 'A',
        },
        ReportRow {
            employee_code: "EMP-0002".to_string(),
            full_name: "Sam Lee".to_string(),
            department: "Engineering".to_string(),
            working_days: 20,
            days_present: 12,
            days_absent: 8,
            days_on_leave: 0,
            attendance_percent: 60.0,
            average_work_hours: 6.5,
            grade: 'C',
        },
    ]
}

#[test]
fn csv_renderer_emits_one_line_per_employee_plus_header() {
    let table = ReportTable::from_rows("June 2024", &sample_rows());
    let bytes = reports::csv::render(&table).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("EMP-0002,Sam Lee"));
}

#[test]
fn excel_renderer_produces_an_xlsx_archive() {
    let table = ReportTable::from_rows("June 2024", &sample_rows());
    let bytes = reports::excel::render(&table).unwrap();

    // .xlsx files are zip archives
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn pdf_renderer_produces_a_pdf_document() {
    let table = ReportTable::from_rows("June 2024", &sample_rows());
    let bytes = reports::pdf::render(&table).unwrap();

    assert_eq!(&bytes[..5], b"%PDF-");
}

#[test]
fn pdf_renderer_handles_an_empty_table() {
    let table = ReportTable::from_rows("June 2024", &[]);
    let bytes = reports::pdf::render(&table).unwrap();

    assert_eq!(&bytes[..5], b"%PDF-");
}

#[test]
fn pdf_renderer_paginates_many_rows() {
    let rows: Vec<ReportRow> = (0..200)
        .map(|i| ReportRow {
            employee_code: format!("EMP-{:04}", i),
            full_name: format!("Employee {}", i),
            department: "Engineering".to_string(),
            working_days: 20,
            days_present: 20,
            days_absent: 0,
            days_on_leave: 0,
            attendance_percent: 100.0,
            average_work_hours: 8.0,
            grade: 'A',
        })
        .collect();

    let table = ReportTable::from_rows("Year 2024", &rows);
    let bytes = reports::pdf::render(&table).unwrap();

    // A 200-row table cannot fit on one A4 landscape page. "/Type /Pages"
    // contains "/Type /Page" as a substring, so subtract it out.
    let text = String::from_utf8_lossy(&bytes);
    let pages = text.matches("/Type /Page").count() - text.matches("/Type /Pages").count();
    assert!(pages > 1, "expected multiple pages, found {}", pages);
}

#[tokio::test]
async fn report_service_computes_rows_from_repositories() {
    let department_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let employee_id = Uuid::new_v4();

    let mut departments = MockDepartmentRepository::new();
    departments
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_department(id, "Engineering"))));

    let mut employees = MockEmployeeRepository::new();
    employees.expect_list_by_department().returning(move |department_id| {
        let mut employee = test_employee(employee_id, user_id);
        employee.department_id = department_id;
        Ok(vec![employee])
    });

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id_with_deleted()
        .returning(|id| Ok(Some(test_user(id, attendly::domain::Role::Employee))));

    let mut attendance = MockAttendanceRepository::new();
    attendance.expect_list_for_employees().returning(move |ids, _, _| {
        let employee_id = ids[0];
        let mut present = test_attendance(employee_id, date(2024, 6, 3), AttendanceStatus::Present);
        present.work_hours = Some(8.0);
        let mut short_day =
            test_attendance(employee_id, date(2024, 6, 4), AttendanceStatus::Present);
        short_day.work_hours = Some(6.0);
        let leave = test_attendance(employee_id, date(2024, 6, 5), AttendanceStatus::Leave);
        Ok(vec![present, short_day, leave])
    });

    let mut holidays = MockHolidayRepository::new();
    holidays.expect_list_in_range().returning(|_, _| Ok(vec![]));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        departments: Arc::new(departments),
        employees: Arc::new(employees),
        attendance: Arc::new(attendance),
        holidays: Arc::new(holidays),
        ..Default::default()
    };
    let service = ReportGenerator::new(Arc::new(uow));

    // Mon..Fri, five working days
    let rows = service
        .attendance_rows(ReportFilter {
            from: date(2024, 6, 3),
            to: date(2024, 6, 7),
            department_id: Some(department_id),
        })
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.working_days, 5);
    assert_eq!(row.days_present, 2);
    assert_eq!(row.days_on_leave, 1);
    assert_eq!(row.days_absent, 2);
    assert_eq!(row.attendance_percent, 40.0);
    assert_eq!(row.average_work_hours, 7.0);
}

#[tokio::test]
async fn report_service_renders_the_selected_format() {
    let mut employees = MockEmployeeRepository::new();
    employees.expect_list_all().returning(|| Ok(vec![]));

    let mut attendance = MockAttendanceRepository::new();
    attendance.expect_list_for_employees().returning(|_, _, _| Ok(vec![]));

    let mut holidays = MockHolidayRepository::new();
    holidays.expect_list_in_range().returning(|_, _| Ok(vec![]));

    let uow = TestUnitOfWork {
        employees: Arc::new(employees),
        attendance: Arc::new(attendance),
        holidays: Arc::new(holidays),
        ..Default::default()
    };
    let service = ReportGenerator::new(Arc::new(uow));

    let filter = ReportFilter {
        from: date(2024, 6, 1),
        to: date(2024, 6, 30),
        department_id: None,
    };

    let report = service
        .attendance_report(filter, ReportFormat::Csv)
        .await
        .unwrap();

    assert_eq!(report.content_type, "text/csv");
    assert_eq!(report.filename, "attendance-report.csv");
    assert!(String::from_utf8(report.bytes).unwrap().starts_with("Employee Code"));
}
