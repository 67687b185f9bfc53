//! In-process directory
//!
//! Behaves like the remote directory: it assigns department ids, refuses to
//! delete a department that still has child departments, and filters staff
//! by department for the scoped queries.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DirectoryService, ServiceResult};
use crate::entity::{Department, DepartmentId, NewDepartment, StaffMember};
use crate::error::ServiceError;

/// Staff member with the department association used by scoped queries
#[derive(Clone, Debug)]
pub struct StaffRecord {
    pub member: StaffMember,
    pub department_id: DepartmentId,
    pub is_manager: bool,
}

struct Directory {
    departments: Vec<Department>,
    staff: Vec<StaffRecord>,
    next_id: DepartmentId,
}

pub struct MemoryDirectoryService {
    inner: RwLock<Directory>,
}

impl MemoryDirectoryService {
    pub fn new() -> Self {
        Self::seeded(Vec::new(), Vec::new())
    }

    pub fn seeded(departments: Vec<Department>, staff: Vec<StaffRecord>) -> Self {
        let next_id = departments.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(Directory {
                departments,
                staff,
                next_id,
            }),
        }
    }

    async fn staff_for(&self, id: DepartmentId, managers: bool) -> ServiceResult<Vec<StaffMember>> {
        let dir = self.inner.read().await;
        if !dir.departments.iter().any(|d| d.id == id) {
            return Err(ServiceError::NotFound(format!("department {}", id)));
        }
        Ok(dir
            .staff
            .iter()
            .filter(|s| s.department_id == id && (!managers || s.is_manager))
            .map(|s| s.member.clone())
            .collect())
    }
}

impl Default for MemoryDirectoryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryService for MemoryDirectoryService {
    async fn list_departments(&self) -> ServiceResult<Vec<Department>> {
        let mut departments = self.inner.read().await.departments.clone();
        departments.sort_by_key(|d| d.id);
        Ok(departments)
    }

    async fn create_department(&self, request: &NewDepartment) -> ServiceResult<Department> {
        if request.description.trim().is_empty() {
            return Err(ServiceError::Rejected("description is required".to_string()));
        }

        let mut dir = self.inner.write().await;

        if let Some(parent_id) = request.parent_id {
            if !dir.departments.iter().any(|d| d.id == parent_id) {
                return Err(ServiceError::Rejected(format!(
                    "parent department {} does not exist",
                    parent_id
                )));
            }
        }

        let dept = Department {
            id: dir.next_id,
            description: request.description.clone(),
            parent_id: request.parent_id,
            manager_id: request.manager_id,
        };
        dir.next_id += 1;
        dir.departments.push(dept.clone());

        tracing::debug!("Directory created department {} ({})", dept.id, dept.description);
        Ok(dept)
    }

    async fn delete_department(&self, id: DepartmentId) -> ServiceResult<()> {
        let mut dir = self.inner.write().await;

        if dir.departments.iter().any(|d| d.parent_id == Some(id)) {
            return Err(ServiceError::Rejected(
                "department has child departments".to_string(),
            ));
        }

        let before = dir.departments.len();
        dir.departments.retain(|d| d.id != id);
        if dir.departments.len() == before {
            return Err(ServiceError::NotFound(format!("department {}", id)));
        }

        tracing::debug!("Directory deleted department {}", id);
        Ok(())
    }

    async fn managers_for_department(&self, id: DepartmentId) -> ServiceResult<Vec<StaffMember>> {
        self.staff_for(id, true).await
    }

    async fn employees_for_department(&self, id: DepartmentId) -> ServiceResult<Vec<StaffMember>> {
        self.staff_for(id, false).await
    }
}
