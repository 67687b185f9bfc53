//! Department entity
//!
//! Wire names follow the directory API: `departmentID`, `description`,
//! `parentID`, `managerID`. Identifiers are always assigned by the directory.

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, ConsoleResult};

pub type DepartmentId = i64;

/// Department as returned by the directory
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "departmentID")]
    pub id: DepartmentId,

    pub description: String,

    /// Parent department (None for a top-level department)
    #[serde(rename = "parentID", default)]
    pub parent_id: Option<DepartmentId>,

    /// Managing employee
    #[serde(rename = "managerID", default)]
    pub manager_id: Option<i64>,
}

impl Department {
    pub fn new(id: DepartmentId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            parent_id: None,
            manager_id: None,
        }
    }
}

/// Create request sent to the directory (no identity yet)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    pub description: String,
    #[serde(rename = "parentID")]
    pub parent_id: Option<DepartmentId>,
    #[serde(rename = "managerID")]
    pub manager_id: Option<i64>,
}

/// Editable field of the add form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftField {
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "parentID")]
    ParentId,
    #[serde(rename = "managerID")]
    ManagerId,
}

/// Client-local staging record for the add form.
///
/// Fields hold raw form text; they are only parsed when the draft is
/// submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentDraft {
    pub description: String,
    #[serde(rename = "parentID")]
    pub parent_id: String,
    #[serde(rename = "managerID")]
    pub manager_id: String,
}

impl DepartmentDraft {
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Description => self.description = value,
            DraftField::ParentId => self.parent_id = value,
            DraftField::ManagerId => self.manager_id = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.parent_id.is_empty() && self.manager_id.is_empty()
    }

    /// Validate the form text and build the create request
    pub fn to_request(&self) -> ConsoleResult<NewDepartment> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ConsoleError::Validation(
                "department description must not be empty".to_string(),
            ));
        }

        Ok(NewDepartment {
            description: description.to_string(),
            parent_id: parse_optional_id("parentID", &self.parent_id)?,
            manager_id: parse_optional_id("managerID", &self.manager_id)?,
        })
    }
}

fn parse_optional_id(field: &str, raw: &str) -> ConsoleResult<Option<i64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| ConsoleError::Validation(format!("{} must be a number, got '{}'", field, raw)))
}
