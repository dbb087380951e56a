//! Client for the hosting provider's REST API and template hosts.
//!
//! Endpoints used:
//!   GET  {api}/user                 : identity for a token
//!   POST {api}/user/repos           : create repository (201 on success)
//!   GET  {api}/licenses/{id}        : license body
//!   GET  {raw}/{template path}      : .gitignore template text
//!   GET  {commit message url}       : random commit message (optional)

use crate::config::Config;
use crate::credential::Credential;
use crate::error::{PronitError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Everything the workflow needs from the hosting side.
pub trait Hosting {
    /// Account login for `credential`, or `None` if the token is not valid.
    fn verify(&self, credential: &Credential) -> Result<Option<String>>;

    fn create_repository(
        &self,
        credential: &Credential,
        name: &str,
        description: Option<&str>,
        private: bool,
    ) -> Result<()>;

    fn fetch_ignore_template(&self, path: &str) -> Result<String>;

    fn fetch_license_text(&self, id: &str) -> Result<String>;

    fn fetch_commit_message(&self) -> Result<String>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
}

#[derive(Debug, Serialize)]
struct CreateRepositoryRequest<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
}

#[derive(Debug, Deserialize)]
struct LicenseResponse {
    body: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

const API_ACCEPT: &str = "application/vnd.github+json";

pub struct HostingClient {
    api_url: String,
    raw_url: String,
    commit_message_url: String,
    client: Client,
}

impl HostingClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("pronit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            raw_url: config.raw_url.trim_end_matches('/').to_string(),
            commit_message_url: config.commit_message_url.clone(),
            client,
        })
    }

    fn api_get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{path}", self.api_url))
            .header(ACCEPT, API_ACCEPT)
    }

    fn authorized(builder: RequestBuilder, credential: &Credential) -> RequestBuilder {
        builder.header(AUTHORIZATION, format!("Bearer {}", credential.expose()))
    }

    fn get_text(&self, url: &str, what: &str) -> Result<String> {
        tracing::debug!(%url, "fetching {what}");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(PronitError::Fetch {
                what: what.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }
}

impl Hosting for HostingClient {
    fn verify(&self, credential: &Credential) -> Result<Option<String>> {
        let response = match Self::authorized(self.api_get("/user"), credential).send() {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "token verification request failed");
                return Ok(None);
            }
        };
        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(status = status.as_u16(), "token rejected");
            return Ok(None);
        }
        match response.json::<UserResponse>() {
            Ok(user) => Ok(Some(user.login)),
            Err(e) => {
                tracing::warn!(error = %e, "unexpected /user response body");
                Ok(None)
            }
        }
    }

    fn create_repository(
        &self,
        credential: &Credential,
        name: &str,
        description: Option<&str>,
        private: bool,
    ) -> Result<()> {
        let body = CreateRepositoryRequest {
            name,
            description: description.unwrap_or(""),
            private,
        };
        let request = self
            .client
            .post(format!("{}/user/repos", self.api_url))
            .header(ACCEPT, API_ACCEPT)
            .json(&body);
        let response = Self::authorized(request, credential)
            .send()
            .map_err(|e| PronitError::RemoteCreation {
                status: None,
                message: e.to_string(),
            })?;
        let status = response.status();
        if status == StatusCode::CREATED {
            tracing::info!(%name, private, "remote repository created");
            return Ok(());
        }
        let text = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.message)
            .unwrap_or(text);
        Err(PronitError::RemoteCreation {
            status: Some(status.as_u16()),
            message,
        })
    }

    fn fetch_ignore_template(&self, path: &str) -> Result<String> {
        let url = format!("{}/{path}", self.raw_url);
        self.get_text(&url, &format!("ignore template {path}"))
    }

    fn fetch_license_text(&self, id: &str) -> Result<String> {
        tracing::debug!(%id, "fetching license");
        let response = self.api_get(&format!("/licenses/{id}")).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(PronitError::Fetch {
                what: format!("license {id}"),
                status: status.as_u16(),
            });
        }
        let license: LicenseResponse = response.json()?;
        Ok(license.body)
    }

    fn fetch_commit_message(&self) -> Result<String> {
        let text = self.get_text(&self.commit_message_url, "commit message")?;
        Ok(text.trim().to_string())
    }
}
