//! HTTP client for the taskboard server
//!
//! The client keeps a cookie store so the HTTP-only session cookie set at
//! login rides along on every later request.

use anyhow::Result;
use chrono::{DateTime, Utc};
use common::model::{Work, WorkStatus};
use serde_json::json;
use uuid::Uuid;

/// Board client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the taskboard server
    pub base_url: String,
    /// Email used to log in
    pub email: String,
    /// Password used to log in
    pub password: String,
}

impl ApiConfig {
    /// Create a new ApiConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BOARD_API_URL`: Server base URL (default: "http://localhost:3000")
    /// - `BOARD_EMAIL`: Login email
    /// - `BOARD_PASSWORD`: Login password
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("BOARD_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        let email = std::env::var("BOARD_EMAIL")
            .map_err(|_| anyhow::anyhow!("BOARD_EMAIL environment variable not set"))?;

        let password = std::env::var("BOARD_PASSWORD")
            .map_err(|_| anyhow::anyhow!("BOARD_PASSWORD environment variable not set"))?;

        Ok(Self {
            base_url,
            email,
            password,
        })
    }
}

/// Typed client for the taskboard REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with a cookie store for the session token
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Register a new user; returns the created record
    pub async fn register(&self, email: &str, password: &str) -> Result<serde_json::Value> {
        let response = self
            .http
            .post(format!("{}/register", self.base_url))
            .json(&json!({"email": email, "password": password}))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Log in and capture the session cookie
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        self.http
            .post(format!("{}/", self.base_url))
            .json(&json!({"email": email, "password": password}))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Log out and drop the session on the server side
    pub async fn logout(&self) -> Result<()> {
        self.http
            .post(format!("{}/logout", self.base_url))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Fetch all work items owned by the logged-in user
    pub async fn fetch_works(&self) -> Result<Vec<Work>> {
        let works = self
            .http
            .get(format!("{}/", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(works)
    }

    /// Create a work item
    pub async fn add_work(
        &self,
        title: &str,
        description: Option<&str>,
        status: WorkStatus,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Work> {
        let work = self
            .http
            .post(format!("{}/add", self.base_url))
            .json(&json!({
                "title": title,
                "description": description,
                "status": status,
                "endDate": end_date.map(|d| d.to_rfc3339()),
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(work)
    }

    /// Partially update a work item
    pub async fn update_work(&self, id: Uuid, updates: serde_json::Value) -> Result<Work> {
        let work = self
            .http
            .patch(format!("{}/update/{}", self.base_url, id))
            .json(&updates)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(work)
    }

    /// Delete a work item
    pub async fn delete_work(&self, id: Uuid) -> Result<()> {
        self.http
            .delete(format!("{}/delete/{}", self.base_url, id))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
