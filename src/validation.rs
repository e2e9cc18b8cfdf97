//! Roster validation.
//!
//! Checks structural integrity of directory and limit data before
//! optimizing. Detects:
//! - Duplicate employee IDs
//! - Duplicate employee names (requests address employees by name)
//! - Roles and rating keys outside the configured role catalog
//! - Hour limits with `min_hours > max_hours`
//! - Hour limits for employees missing from the directory

use std::collections::{BTreeMap, HashSet};

use crate::config::RoleCatalog;
use crate::models::{Employee, EmployeeId, HourLimit};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two employees share the same ID.
    DuplicateId,
    /// Two employees share the same name.
    DuplicateName,
    /// An employee's primary role is not in the catalog.
    UnknownRole,
    /// An employee is rated for a role that is not in the catalog.
    UnknownRatingRole,
    /// A limit's minimum exceeds its maximum.
    InvertedLimit,
    /// A limit refers to an employee the directory does not know.
    UnknownEmployee,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates directory entries and hour limits.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(
    employees: &[Employee],
    limits: &BTreeMap<EmployeeId, HourLimit>,
    catalog: &RoleCatalog,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for e in employees {
        if !ids.insert(e.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", e.id),
            ));
        }
        if !names.insert(e.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate employee name: {}", e.name),
            ));
        }
        if !catalog.admits(&e.role) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRole,
                format!("Employee '{}' has unknown role '{}'", e.name, e.role),
            ));
        }
        for role in e.ratings.roles().filter(|r| !catalog.admits(r)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRatingRole,
                format!("Employee '{}' is rated for unknown role '{role}'", e.name),
            ));
        }
    }

    for (id, limit) in limits {
        if !limit.is_consistent() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedLimit,
                format!(
                    "Employee {id} has min_hours {} above max_hours {}",
                    limit.min_hours, limit.max_hours
                ),
            ));
        }
        if !ids.contains(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownEmployee,
                format!("Hour limit refers to unknown employee {id}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> RoleCatalog {
        RoleCatalog::new(["Server", "Cook"])
    }

    fn sample_employees() -> Vec<Employee> {
        vec![
            Employee::new(1, "Ana", "Server").with_rating("Server", 8),
            Employee::new(2, "Ben", "Cook")
                .with_rating("Cook", 6)
                .with_rating("Server", 3),
        ]
    }

    fn sample_limits() -> BTreeMap<EmployeeId, HourLimit> {
        BTreeMap::from([
            (EmployeeId(1), HourLimit::new(20, 50)),
            (EmployeeId(2), HourLimit::at_most(40)),
        ])
    }

    #[test]
    fn test_valid_roster() {
        assert!(validate_roster(&sample_employees(), &sample_limits(), &catalog()).is_ok());
    }

    #[test]
    fn test_duplicate_id_and_name() {
        let mut employees = sample_employees();
        employees.push(Employee::new(1, "Ana", "Server"));

        let errors = validate_roster(&employees, &sample_limits(), &catalog()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateName));
    }

    #[test]
    fn test_unknown_roles() {
        let employees = vec![Employee::new(1, "Ana", "Host").with_rating("Bartender", 4)];
        let errors = validate_roster(&employees, &BTreeMap::new(), &catalog()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownRole));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownRatingRole
                && e.message.contains("Bartender")));
    }

    #[test]
    fn test_empty_catalog_skips_role_checks() {
        let employees = vec![Employee::new(1, "Ana", "Host").with_rating("Bartender", 4)];
        assert!(validate_roster(&employees, &BTreeMap::new(), &RoleCatalog::default()).is_ok());
    }

    #[test]
    fn test_limit_problems() {
        let mut limits = sample_limits();
        limits.insert(EmployeeId(1), HourLimit::new(60, 40));
        limits.insert(EmployeeId(9), HourLimit::at_most(10));

        let errors = validate_roster(&sample_employees(), &limits, &catalog()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvertedLimit);
        assert_eq!(errors[1].kind, ValidationErrorKind::UnknownEmployee);
    }
}
