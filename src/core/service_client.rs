// src/core/service_client.rs
//! HTTP client for the screening backend. Every response is decoded into an
//! explicit type and validated before it is handed back.

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, trace};

use crate::core::config_manager::ServiceConfig;
use crate::intake::ValidatedApplication;
use crate::types::{
    Ack, AnalyzedApplicant, Applicant, CriteriaSubmission, ParseAllResponse, Validate,
};
use crate::utils::{read_upload, PDF_MIME};

const APPLY_ENDPOINT: &str = "/apply";
const SET_CRITERIA_ENDPOINT: &str = "/setcriteria";
const APPLICATIONS_ENDPOINT: &str = "/applications";
const DELETE_STUDENT_ENDPOINT: &str = "/student/delete";
const DELETE_ALL_STUDENTS_ENDPOINT: &str = "/student/delete_all";
const PARSE_ALL_ENDPOINT: &str = "/parse_all";
const ANALYZED_ENDPOINT: &str = "/analyzed";
const DELETE_ANALYSIS_ENDPOINT: &str = "/analysis/delete";
const DELETE_ALL_ANALYSES_ENDPOINT: &str = "/analysis/delete_all";

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

pub struct ServiceClient {
    client: reqwest::Client,
    intake_url: String,
    recruiter_url: String,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            intake_url: config.intake_url.clone(),
            recruiter_url: config.recruiter_url.clone(),
        })
    }

    fn recruiter(&self, endpoint: &str) -> String {
        format!("{}{}", self.recruiter_url, endpoint)
    }

    /// Submit an application with its resume
    pub async fn apply(&self, application: &ValidatedApplication) -> Result<Ack> {
        let url = format!("{}{}", self.intake_url, APPLY_ENDPOINT);
        let resume = read_upload(application.resume_path()).await?;

        let form = build_form(
            application.form_fields(),
            RESUME_FIELD,
            resume,
            application.resume_name(),
            application.resume_mime(),
        )?;

        info!("Submitting application for {} to {}", application.name(), url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("Submission failed. Please try again.")?;

        let ack: Ack = decode_response(response)
            .await
            .context("Submission failed. Please try again.")?;
        ack.ensure_success("Submission")
    }

    /// Upload criteria together with the job description PDF
    pub async fn set_criteria(&self, submission: &CriteriaSubmission) -> Result<Ack> {
        let url = self.recruiter(SET_CRITERIA_ENDPOINT);
        let job_description = read_upload(&submission.job_description).await?;

        let form = build_form(
            submission.form.form_fields(),
            JOB_DESCRIPTION_FIELD,
            job_description,
            &submission.file_name,
            PDF_MIME,
        )?;

        info!("Setting criteria with job description {} at {}", submission.file_name, url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("HTTP request failed")?;

        let ack: Ack = decode_response(response).await?;
        ack.ensure_success("Setting criteria")
    }

    pub async fn list_applications(&self) -> Result<Vec<Applicant>> {
        self.get(APPLICATIONS_ENDPOINT).await
    }

    pub async fn delete_application(&self, id: i64) -> Result<Ack> {
        self.delete(&format!("{}/{}", DELETE_STUDENT_ENDPOINT, id))
            .await?
            .ensure_success(&format!("Deleting application {}", id))
    }

    pub async fn delete_all_applications(&self) -> Result<Ack> {
        self.delete(DELETE_ALL_STUDENTS_ENDPOINT)
            .await?
            .ensure_success("Deleting all applications")
    }

    /// Trigger the server-side parse/score pass
    pub async fn parse_all(&self) -> Result<ParseAllResponse> {
        let url = self.recruiter(PARSE_ALL_ENDPOINT);
        info!("Triggering parse of all applications: {}", url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        let parsed: ParseAllResponse = decode_response(response).await?;
        parsed.validate().context("Malformed parse response")?;
        Ok(parsed)
    }

    pub async fn list_analyzed(&self) -> Result<Vec<AnalyzedApplicant>> {
        self.get(ANALYZED_ENDPOINT).await
    }

    pub async fn delete_analysis(&self, id: i64) -> Result<Ack> {
        self.delete(&format!("{}/{}", DELETE_ANALYSIS_ENDPOINT, id))
            .await?
            .ensure_success(&format!("Deleting analysis {}", id))
    }

    pub async fn delete_all_analyses(&self) -> Result<Ack> {
        self.delete(DELETE_ALL_ANALYSES_ENDPOINT)
            .await?
            .ensure_success("Deleting all analyses")
    }

    /// Generic validated GET against the recruiter endpoints
    async fn get<R>(&self, endpoint: &str) -> Result<R>
    where
        R: DeserializeOwned + Validate,
    {
        let url = self.recruiter(endpoint);
        trace!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        let decoded: R = decode_response(response).await?;
        decoded
            .validate()
            .with_context(|| format!("Malformed response from {}", url))?;
        Ok(decoded)
    }

    async fn delete(&self, endpoint: &str) -> Result<Ack> {
        let url = self.recruiter(endpoint);
        info!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to DELETE {}", url))?;

        decode_response(response).await
    }
}

fn build_form(
    fields: Vec<(&'static str, String)>,
    file_field: &'static str,
    content: Vec<u8>,
    file_name: &str,
    mime: &str,
) -> Result<Form> {
    let form = fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));

    let part = Part::bytes(content)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .context("Failed to create multipart")?;

    Ok(form.part(file_field, part))
}

/// Read the body as text first so decode failures can show what came back
async fn decode_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
    let status = response.status();
    trace!("Response status: {}", status);

    let body = response
        .text()
        .await
        .context("Failed to read response text")?;

    if !status.is_success() {
        error!("Service error response: {}", body);
        anyhow::bail!("Service returned error status {}: {}", status, body);
    }

    debug!("Raw service response: {}", body);
    serde_json::from_str(&body)
        .with_context(|| format!("Failed to parse service response. Raw response: {}", body))
}
