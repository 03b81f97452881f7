//! Document endpoints: generated-document edits and base-resume onboarding.
//!
//! Updates are full-document replaces; the backend keeps no patch semantics,
//! so the caller re-fetches the snapshot after a successful save rather than
//! editing its local copy.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::{GeneratedCoverLetter, GeneratedResume, UserResume};

impl ApiClient {
    pub async fn update_resume(
        &self,
        application_id: Uuid,
        resume: &GeneratedResume,
    ) -> Result<GeneratedResume, ApiError> {
        let builder = self
            .request(
                Method::PUT,
                &format!("/api/v1/applications/{application_id}/resume"),
            )
            .json(resume);
        self.send(builder).await
    }

    pub async fn update_cover_letter(
        &self,
        application_id: Uuid,
        cover_letter: &GeneratedCoverLetter,
    ) -> Result<GeneratedCoverLetter, ApiError> {
        let builder = self
            .request(
                Method::PUT,
                &format!("/api/v1/applications/{application_id}/cover-letter"),
            )
            .json(cover_letter);
        self.send(builder).await
    }

    /// Uploads a resume file for server-side parsing; returns the structured
    /// resume the backend extracted.
    pub async fn upload_resume(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UserResume, ApiError> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")?;
        let form = Form::new().part("file", part);
        let builder = self
            .request(Method::POST, "/api/v1/resumes/upload")
            .multipart(form);
        self.send(builder).await
    }

    /// Saves the user's base resume (reviewed or hand-entered).
    pub async fn save_resume(&self, resume: &UserResume) -> Result<UserResume, ApiError> {
        let builder = self.request(Method::POST, "/api/v1/resumes").json(resume);
        self.send(builder).await
    }
}
