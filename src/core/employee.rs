//! Employee business logic - Handles the delivery staff roster.
//!
//! Provides functions for listing, creating, partially updating and removing
//! employees. Ids are generated when the caller does not supply one, and all
//! mutations go through a single store write so that a rejected change leaves
//! the roster untouched.

use crate::{
    entities::{Employee, EmployeePatch, EmployeeStatus, NewEmployee},
    errors::{Error, Result},
    store::Store,
};
use tracing::info;

/// Placeholder avatar used until a profile picture is uploaded.
#[must_use]
pub fn placeholder_avatar(seed: &str) -> String {
    format!("https://picsum.photos/seed/{seed}/40/40")
}

/// Retrieves all employees, active and inactive, in stored order.
pub async fn list_employees(store: &Store) -> Result<Vec<Employee>> {
    Ok(store.read(|db| db.employees.clone()).await)
}

/// Finds an employee by id.
pub async fn get_employee(store: &Store, id: &str) -> Result<Option<Employee>> {
    Ok(store
        .read(|db| db.employees.iter().find(|e| e.id == id).cloned())
        .await)
}

/// Creates a new employee, filling defaults for id, status, join date and avatar.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The daily pay rate is negative or not finite
/// - An employee with the given id already exists
pub async fn add_employee(store: &Store, new: NewEmployee) -> Result<Employee> {
    if new.name.trim().is_empty() {
        return Err(Error::validation("Employee name cannot be empty"));
    }
    if let Some(rate) = new.daily_pay_rate {
        super::validate_amount(rate)?;
    }

    let id = new
        .id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| super::generate_id("emp"));

    let employee = Employee {
        avatar_url: new.avatar_url.unwrap_or_else(|| placeholder_avatar(&id)),
        id,
        name: new.name.trim().to_string(),
        phone: new.phone,
        status: new.status.unwrap_or(EmployeeStatus::Active),
        join_date: new.join_date.unwrap_or_else(super::today),
        birthday: new.birthday,
        notes: new.notes,
        profile_picture: new.profile_picture,
        aadhar_card: new.aadhar_card,
        designation: new.designation,
        gender: new.gender,
        address: new.address,
        track_attendance: new.track_attendance,
        employment_type: new.employment_type,
        daily_pay_rate: new.daily_pay_rate,
    };

    let saved = store
        .write(|db| {
            if db.employees.iter().any(|e| e.id == employee.id) {
                return Err(Error::DuplicateId {
                    kind: "employee",
                    id: employee.id.clone(),
                });
            }
            db.employees.push(employee.clone());
            Ok(employee)
        })
        .await?;
    info!(employee = %saved.id, "Added employee");
    Ok(saved)
}

/// Shallow-merges `patch` into the employee with the given id.
///
/// # Errors
/// Returns an error if:
/// - The employee does not exist
/// - The patch sets an empty name or an invalid pay rate
pub async fn update_employee(store: &Store, id: &str, patch: EmployeePatch) -> Result<Employee> {
    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(Error::validation("Employee name cannot be empty"));
    }
    if let Some(Some(rate)) = patch.daily_pay_rate {
        super::validate_amount(rate)?;
    }

    let updated = store
        .write(|db| {
            let employee = db
                .employees
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| Error::EmployeeNotFound { id: id.to_string() })?;
            employee.apply(patch);
            Ok(employee.clone())
        })
        .await?;
    info!(employee = %id, "Updated employee");
    Ok(updated)
}

/// Removes an employee from the roster. Past deliveries keep their employee id.
///
/// # Errors
/// Returns an error if the employee does not exist.
pub async fn delete_employee(store: &Store, id: &str) -> Result<Employee> {
    let removed = store
        .write(|db| {
            let index = db
                .employees
                .iter()
                .position(|e| e.id == id)
                .ok_or_else(|| Error::EmployeeNotFound { id: id.to_string() })?;
            Ok(db.employees.remove(index))
        })
        .await?;
    info!(employee = %id, "Deleted employee");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_employee_fills_defaults() -> Result<()> {
        let store = setup_test_store();
        let employee = add_employee(&store, new_employee("Ravi Kumar")).await?;

        assert!(employee.id.starts_with("emp_"));
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert_eq!(employee.join_date, crate::core::today());
        assert!(employee.avatar_url.contains(&employee.id));

        let found = get_employee(&store, &employee.id).await?.unwrap();
        assert_eq!(found, employee);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_employee_keeps_supplied_id() -> Result<()> {
        let store = setup_test_store();
        let mut new = new_employee("Anita");
        new.id = Some("emp_42".to_string());
        let employee = add_employee(&store, new).await?;
        assert_eq!(employee.id, "emp_42");
        Ok(())
    }

    #[tokio::test]
    async fn test_add_employee_validation() -> Result<()> {
        let store = setup_test_store();

        let result = add_employee(&store, new_employee("  ")).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let mut duplicate = new_employee("Someone");
        duplicate.id = Some("emp_01".to_string());
        let result = add_employee(&store, duplicate).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateId { kind: "employee", .. }
        ));

        let mut bad_rate = new_employee("Someone");
        bad_rate.daily_pay_rate = Some(-5.0);
        let result = add_employee(&store, bad_rate).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_employee_integration() -> Result<()> {
        let store = setup_test_store();
        let patch = EmployeePatch {
            phone: Some("9000000000".to_string()),
            status: Some(EmployeeStatus::Inactive),
            ..EmployeePatch::default()
        };

        let updated = update_employee(&store, "emp_01", patch).await?;
        assert_eq!(updated.phone, "9000000000");
        assert!(!updated.is_active());
        assert_eq!(updated.name, "John Doe");

        let stored = get_employee(&store, "emp_01").await?.unwrap();
        assert_eq!(stored.status, EmployeeStatus::Inactive);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_employee_not_found() -> Result<()> {
        let store = setup_test_store();
        let result = update_employee(&store, "emp_999", EmployeePatch::default()).await;
        assert!(matches!(result.unwrap_err(), Error::EmployeeNotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_employee_integration() -> Result<()> {
        let store = setup_test_store();
        let before = list_employees(&store).await?.len();

        let removed = delete_employee(&store, "emp_02").await?;
        assert_eq!(removed.name, "Jane Smith");
        assert_eq!(list_employees(&store).await?.len(), before - 1);

        let result = delete_employee(&store, "emp_02").await;
        assert!(matches!(result.unwrap_err(), Error::EmployeeNotFound { .. }));
        Ok(())
    }
}
