//! Employee and department service tests over mock repositories.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use attendly::domain::Role;
use attendly::errors::AppError;
use attendly::infra::repositories::{
    MockDepartmentRepository, MockEmployeeRepository, MockUserRepository,
};
use attendly::infra::EmployeeChanges;
use attendly::services::{
    DepartmentManager, DepartmentService, EmployeeManager, EmployeeService, NewEmployee,
};

use common::{date, test_department, test_employee, TestUnitOfWork};

#[tokio::test]
async fn employee_cannot_manage_themselves() {
    let employee_id = Uuid::new_v4();

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .with(eq(employee_id))
        .returning(move |id| Ok(Some(test_employee(id, Uuid::new_v4()))));

    let uow = TestUnitOfWork {
        employees: Arc::new(employees),
        ..Default::default()
    };
    let service = EmployeeManager::new(Arc::new(uow));

    let result = service
        .update_employee(
            employee_id,
            EmployeeChanges {
                manager_id: Some(Some(employee_id)),
                ..Default::default()
            },
        )
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("cannot manage themselves")));
}

#[tokio::test]
async fn duplicate_employee_code_is_a_conflict() {
    let user_id = Uuid::new_v4();
    let department_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(common::test_user(id, Role::Employee))));

    let mut departments = MockDepartmentRepository::new();
    departments
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_department(id, "Engineering"))));

    let mut employees = MockEmployeeRepository::new();
    employees.expect_find_by_user_id().returning(|_| Ok(None));
    employees
        .expect_find_by_code()
        .withf(|code| code == "EMP-0001")
        .returning(|code| {
            let mut employee = test_employee(Uuid::new_v4(), Uuid::new_v4());
            employee.employee_code = code.to_string();
            Ok(Some(employee))
        });

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        departments: Arc::new(departments),
        employees: Arc::new(employees),
        ..Default::default()
    };
    let service = EmployeeManager::new(Arc::new(uow));

    let result = service
        .create_employee(NewEmployee {
            user_id,
            department_id,
            employee_code: "EMP-0001".to_string(),
            designation: None,
            manager_id: None,
            hire_date: date(2024, 1, 8),
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn deleting_an_employee_touches_no_department() {
    let employee_id = Uuid::new_v4();

    let mut employees = MockEmployeeRepository::new();
    employees.expect_delete().with(eq(employee_id)).returning(|_| Ok(()));

    // The department mock has no expectations: any department call would
    // panic the test
    let uow = TestUnitOfWork {
        employees: Arc::new(employees),
        ..Default::default()
    };
    let service = EmployeeManager::new(Arc::new(uow));

    assert!(service.delete_employee(employee_id).await.is_ok());
}

#[tokio::test]
async fn department_with_employees_cannot_be_deleted() {
    let department_id = Uuid::new_v4();

    let mut departments = MockDepartmentRepository::new();
    departments
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_department(id, "Engineering"))));

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_count_by_department()
        .with(eq(department_id))
        .returning(|_| Ok(4));

    let uow = TestUnitOfWork {
        departments: Arc::new(departments),
        employees: Arc::new(employees),
        ..Default::default()
    };
    let service = DepartmentManager::new(Arc::new(uow));

    let result = service.delete_department(department_id).await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("assigned employees")));
}

#[tokio::test]
async fn empty_department_deletes_cleanly() {
    let department_id = Uuid::new_v4();

    let mut departments = MockDepartmentRepository::new();
    departments
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_department(id, "Engineering"))));
    departments.expect_delete().with(eq(department_id)).returning(|_| Ok(()));

    let mut employees = MockEmployeeRepository::new();
    employees.expect_count_by_department().returning(|_| Ok(0));

    let uow = TestUnitOfWork {
        departments: Arc::new(departments),
        employees: Arc::new(employees),
        ..Default::default()
    };
    let service = DepartmentManager::new(Arc::new(uow));

    assert!(service.delete_department(department_id).await.is_ok());
}

#[tokio::test]
async fn duplicate_department_name_is_a_conflict() {
    let mut departments = MockDepartmentRepository::new();
    departments
        .expect_find_by_name()
        .withf(|name| name == "Engineering")
        .returning(|name| Ok(Some(test_department(Uuid::new_v4(), name))));

    let uow = TestUnitOfWork {
        departments: Arc::new(departments),
        ..Default::default()
    };
    let service = DepartmentManager::new(Arc::new(uow));

    let result = service
        .create_department("Engineering".to_string(), None)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}
