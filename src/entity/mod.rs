//! Entity module - directory data shapes
//!
//! Departments are owned by the remote directory; staff members are read-only
//! projections returned by the department-scoped queries.

pub mod department;
pub mod staff;

pub use department::{Department, DepartmentDraft, DepartmentId, DraftField, NewDepartment};
pub use staff::{StaffId, StaffMember};
