//! HTTP client for the remote directory API

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use super::{DirectoryService, ServiceResult};
use crate::entity::{Department, DepartmentId, NewDepartment, StaffMember};
use crate::error::ServiceError;

pub struct HttpDirectoryService {
    http: Client,
    base_url: String,
}

impl HttpDirectoryService {
    pub fn new(base_url: &str, timeout: Duration) -> ServiceResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turn a non-2xx response into `ServiceError::Status`, keeping the body text
async fn check_status(response: Response) -> ServiceResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ServiceError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl DirectoryService for HttpDirectoryService {
    async fn list_departments(&self) -> ServiceResult<Vec<Department>> {
        let response = self.http.get(self.url("/departments")).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn create_department(&self, request: &NewDepartment) -> ServiceResult<Department> {
        let response = self
            .http
            .post(self.url("/departments"))
            .json(request)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn delete_department(&self, id: DepartmentId) -> ServiceResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/departments/{}", id)))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn managers_for_department(&self, id: DepartmentId) -> ServiceResult<Vec<StaffMember>> {
        let response = self
            .http
            .get(self.url(&format!("/departments/{}/managers", id)))
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn employees_for_department(&self, id: DepartmentId) -> ServiceResult<Vec<StaffMember>> {
        let response = self
            .http
            .get(self.url(&format!("/departments/{}/employees", id)))
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }
}
