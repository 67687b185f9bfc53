//! Remote directory contract
//!
//! The console never owns department data; every read and write goes through a
//! [`DirectoryService`]. Two implementations ship with the crate: the HTTP
//! client used in production and an in-process directory for local runs.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{DirectoryConfig, DirectoryMode};
use crate::entity::{Department, DepartmentId, NewDepartment, StaffMember};
use crate::error::ServiceError;

mod http;
mod memory;

pub use http::HttpDirectoryService;
pub use memory::{MemoryDirectoryService, StaffRecord};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Shared handle used by the console sessions
pub type SharedDirectory = Arc<dyn DirectoryService>;

#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn list_departments(&self) -> ServiceResult<Vec<Department>>;

    /// Create a department; the returned entity carries the directory-assigned id
    async fn create_department(&self, request: &NewDepartment) -> ServiceResult<Department>;

    async fn delete_department(&self, id: DepartmentId) -> ServiceResult<()>;

    async fn managers_for_department(&self, id: DepartmentId) -> ServiceResult<Vec<StaffMember>>;

    async fn employees_for_department(&self, id: DepartmentId) -> ServiceResult<Vec<StaffMember>>;
}

/// Build the directory backend selected in the config
pub fn from_config(config: &DirectoryConfig) -> ServiceResult<SharedDirectory> {
    match config.mode {
        DirectoryMode::Http => {
            let service = HttpDirectoryService::new(
                &config.base_url,
                Duration::from_secs(config.timeout_secs),
            )?;
            tracing::info!("Using remote directory at {}", config.base_url);
            Ok(Arc::new(service))
        }
        DirectoryMode::Memory => {
            let staff = config
                .seed
                .staff
                .iter()
                .map(|s| StaffRecord {
                    member: s.member(),
                    department_id: s.department_id,
                    is_manager: s.manager,
                })
                .collect();
            tracing::info!(
                "Using in-memory directory with {} departments",
                config.seed.departments.len()
            );
            Ok(Arc::new(MemoryDirectoryService::seeded(
                config.seed.departments.clone(),
                staff,
            )))
        }
    }
}
