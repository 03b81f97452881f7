//! Job application endpoints: start generation, fetch, list, search, delete.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::{JobApplicationSnapshot, JobApplicationSummary};

#[derive(Debug, Clone, Serialize)]
pub struct StartGenerationRequest {
    pub job_role: String,
    pub job_description: String,
    pub company: String,
}

/// Offset/limit page envelope returned by the list and search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub has_next: bool,
}

impl ApiClient {
    /// Kicks off the generation pipeline and returns the initial snapshot,
    /// the one to open a stream subscription against.
    pub async fn start_generation(
        &self,
        request: &StartGenerationRequest,
    ) -> Result<JobApplicationSnapshot, ApiError> {
        let builder = self
            .request(Method::POST, "/api/v1/applications")
            .json(request);
        self.send(builder).await
    }

    pub async fn get_application(&self, id: Uuid) -> Result<JobApplicationSnapshot, ApiError> {
        let builder = self.request(Method::GET, &format!("/api/v1/applications/{id}"));
        self.send(builder).await
    }

    pub async fn list_applications(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<Page<JobApplicationSummary>, ApiError> {
        let builder = self
            .request(Method::GET, "/api/v1/applications")
            .query(&[("offset", offset), ("limit", limit)]);
        self.send(builder).await
    }

    pub async fn search_applications(
        &self,
        query: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page<JobApplicationSummary>, ApiError> {
        let builder = self
            .request(Method::GET, "/api/v1/applications/search")
            .query(&[("q", query)])
            .query(&[("offset", offset), ("limit", limit)]);
        self.send(builder).await
    }

    pub async fn delete_application(&self, id: Uuid) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/api/v1/applications/{id}"));
        self.send_no_content(builder).await
    }
}
