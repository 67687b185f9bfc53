//! Staff entity - employees and managers as seen by the console

use serde::{Deserialize, Serialize};

pub type StaffId = i64;

/// Employee or manager projection returned by scoped queries
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
}

impl StaffMember {
    pub fn new(id: StaffId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
