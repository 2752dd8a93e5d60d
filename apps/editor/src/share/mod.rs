//! Share collaborator: stores a copy of the document remotely and builds a public link.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::Document;

const RESUMES_TABLE_PATH: &str = "/rest/v1/resumes";
const SHARE_PAGE: &str = "share.html";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Share client not loaded. Please refresh.")]
    ClientUnavailable,

    #[error("Configuration missing.")]
    ConfigMissing,

    #[error("Failed to generate link. Check logs for details.")]
    Http(#[from] reqwest::Error),

    #[error("Failed to generate link. Check logs for details.")]
    Remote { status: u16, message: String },
}

#[async_trait]
pub trait ShareBackend: Send + Sync {
    /// Inserts `doc` as a new record and returns the record id.
    async fn insert(&self, doc: &Document) -> Result<String, ShareError>;
}

#[derive(Serialize)]
struct InsertRow<'a> {
    content: &'a Document,
}

#[derive(Deserialize)]
struct InsertedRow {
    id: serde_json::Value,
}

/// PostgREST-style backend (`POST {url}/rest/v1/resumes`).
pub struct SupabaseShareBackend {
    client: Option<Client>,
    url: Option<String>,
    anon_key: Option<String>,
}

impl SupabaseShareBackend {
    pub fn new(url: Option<String>, anon_key: Option<String>) -> Self {
        let client = match Client::builder().timeout(Duration::from_secs(30)).build() {
            Ok(c) => Some(c),
            Err(e) => {
                warn!("Share client could not be built: {e}");
                None
            }
        };
        Self {
            client,
            url: url.filter(|u| !u.trim().is_empty()),
            anon_key: anon_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

#[async_trait]
impl ShareBackend for SupabaseShareBackend {
    async fn insert(&self, doc: &Document) -> Result<String, ShareError> {
        let client = self.client.as_ref().ok_or(ShareError::ClientUnavailable)?;
        let (url, key) = match (&self.url, &self.anon_key) {
            (Some(u), Some(k)) => (u, k),
            _ => return Err(ShareError::ConfigMissing),
        };

        let response = client
            .post(format!("{}{RESUMES_TABLE_PATH}", url.trim_end_matches('/')))
            .header("apikey", key)
            .header("Authorization", format!("Bearer {key}"))
            .header("Prefer", "return=representation")
            .json(&InsertRow { content: doc })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ShareError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let rows: Vec<InsertedRow> = response.json().await?;
        let id = match rows.into_iter().next().map(|r| r.id) {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Number(n)) => n.to_string(),
            other => {
                return Err(ShareError::Remote {
                    status: status.as_u16(),
                    message: format!("insert returned no usable id: {other:?}"),
                })
            }
        };
        debug!("Shared document stored as record {id}");
        Ok(id)
    }
}

/// Directory part of the caller's page URL (`http://h/app/index.html` -> `http://h/app`).
pub fn base_from_page_url(page_url: &str) -> Option<String> {
    let without_fragment = page_url.split(['#', '?']).next().unwrap_or("");
    let scheme_end = without_fragment.find("://")? + 3;
    let path_start = without_fragment[scheme_end..].find('/').map(|i| i + scheme_end);
    match path_start {
        None if scheme_end < without_fragment.len() => Some(without_fragment.to_string()),
        None => None,
        Some(_) => without_fragment
            .rfind('/')
            .map(|last| without_fragment[..last].to_string()),
    }
}

pub fn share_link(base: &str, id: &str) -> String {
    format!("{}/{SHARE_PAGE}?id={id}", base.trim_end_matches('/'))
}
