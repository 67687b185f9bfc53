//! Console session
//!
//! Runs console operations against the directory. The console lock is held
//! only while a request is issued and while its result is applied, never
//! across the directory call, so other operations proceed while one is in
//! flight. Results are applied in completion order; request tickets decide
//! whether a late result still counts.
//!
//! Once issued, a directory call and the application of its result run on
//! their own task. Dropping the caller (a disconnected HTTP client) does not
//! cancel them, so the console still follows writes the directory confirmed.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{Console, ConsoleEvent, ConsoleSnapshot, StaffScope};
use crate::directory::SharedDirectory;
use crate::entity::DepartmentId;
use crate::error::{ConsoleError, ConsoleResult};

#[derive(Clone)]
pub struct ConsoleSession {
    console: Arc<RwLock<Console>>,
    directory: SharedDirectory,
}

impl ConsoleSession {
    pub fn new(directory: SharedDirectory) -> Self {
        Self {
            console: Arc::new(RwLock::new(Console::new())),
            directory,
        }
    }

    pub async fn snapshot(&self) -> ConsoleSnapshot {
        self.console.read().await.snapshot()
    }

    /// Apply a user action that needs no directory call
    pub async fn dispatch(&self, event: ConsoleEvent) -> ConsoleResult<()> {
        self.console.write().await.apply(event)
    }

    /// Fetch the full department listing
    pub async fn load(&self) -> ConsoleResult<()> {
        let ticket = self.console.write().await.begin_load();
        let directory = self.directory.clone();
        self.settle(async move {
            let result = directory.list_departments().await;
            ConsoleEvent::ListingLoaded { ticket, result }
        })
        .await
    }

    /// Delete the department shown in the delete confirmation
    pub async fn confirm_delete(&self) -> ConsoleResult<()> {
        let department_id = self.console.read().await.begin_delete()?;
        let directory = self.directory.clone();
        self.settle(async move {
            let result = directory.delete_department(department_id).await;
            ConsoleEvent::DeleteCompleted {
                department_id,
                result,
            }
        })
        .await
    }

    /// Submit the add-form draft
    pub async fn submit_add(&self) -> ConsoleResult<()> {
        let add = self.console.write().await.begin_add()?;
        let directory = self.directory.clone();
        self.settle(async move {
            let result = directory.create_department(&add.request).await;
            ConsoleEvent::AddCompleted {
                session: add.session,
                result,
            }
        })
        .await
    }

    /// Fetch managers or employees of a department; the list dialog opens
    /// once the result is in
    pub async fn request_staff(&self, scope: StaffScope, department_id: DepartmentId) -> ConsoleResult<()> {
        let request = self
            .console
            .write()
            .await
            .begin_staff_query(scope, department_id);
        let directory = self.directory.clone();
        self.settle(async move {
            let result = match scope {
                StaffScope::Managers => directory.managers_for_department(department_id).await,
                StaffScope::Employees => directory.employees_for_department(department_id).await,
            };
            ConsoleEvent::StaffLoaded { request, result }
        })
        .await
    }

    /// Run an issued directory call to completion and apply its result.
    /// The caller only waits for the outcome.
    async fn settle<F>(&self, call: F) -> ConsoleResult<()>
    where
        F: Future<Output = ConsoleEvent> + Send + 'static,
    {
        let console = self.console.clone();
        let task = tokio::spawn(async move {
            let event = call.await;
            let mut console = console.write().await;
            console.apply(event)
        });
        task.await
            .map_err(|e| ConsoleError::Internal(format!("console task failed: {}", e)))?
    }
}
