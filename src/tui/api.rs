//! HTTP client for the persona API

use anyhow::{Context, Result};
use log::debug;

use crate::storage::{NewPersona, PersonaRecord};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/personas`
    pub async fn save_persona(&self, persona: &NewPersona) -> Result<PersonaRecord> {
        let url = format!("{}/api/personas", self.base_url);
        debug!("Saving persona {} for user {}", persona.persona_type, persona.user_id);

        let response = self
            .http
            .post(&url)
            .json(persona)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?
            .error_for_status()
            .context("Server rejected persona")?;

        response
            .json::<PersonaRecord>()
            .await
            .context("Malformed persona response")
    }

    /// `GET /api/personas/:user_id`
    pub async fn personas(&self, user_id: i64) -> Result<Vec<PersonaRecord>> {
        let url = format!("{}/api/personas/{user_id}", self.base_url);
        self.http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?
            .error_for_status()
            .context("Server rejected persona lookup")?
            .json()
            .await
            .context("Malformed persona list")
    }
}
