//! Employee reference data.
//!
//! Employees are administered by the surrounding system; the engine only
//! reads them to resolve role codes and existence/active checks during
//! assignment and reward computation.

use serde::{Deserialize, Serialize};

/// An employee as seen by the engine.
///
/// # Example
///
/// ```
/// use kpi_engine::models::Employee;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Sari Wulandari".to_string(),
///     role_code: "IT_STAFF".to_string(),
///     department_id: "dept_it".to_string(),
///     active: true,
/// };
/// assert!(employee.is_assignable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// The role code used to select reward rules (e.g., "IT_STAFF").
    pub role_code: String,
    /// The department the employee belongs to.
    pub department_id: String,
    /// Whether the employee is active. Inactive employees cannot receive
    /// new KPI assignments.
    pub active: bool,
}

impl Employee {
    /// Returns true if the employee may receive new KPI assignments.
    pub fn is_assignable(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(active: bool) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Sari Wulandari".to_string(),
            role_code: "IT_STAFF".to_string(),
            department_id: "dept_it".to_string(),
            active,
        }
    }

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": "emp_001",
            "name": "Sari Wulandari",
            "role_code": "IT_STAFF",
            "department_id": "dept_it",
            "active": true
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.role_code, "IT_STAFF");
        assert!(employee.active);
    }

    #[test]
    fn test_serialize_round_trip() {
        let employee = create_test_employee(true);
        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_inactive_employee_is_not_assignable() {
        assert!(!create_test_employee(false).is_assignable());
        assert!(create_test_employee(true).is_assignable());
    }
}
