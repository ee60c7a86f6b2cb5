//! This module provides a client to the REST backend that stores the task records
//!
//! The backend exposes its tables through a PostgREST-style API: rows are filtered with `column=eq.value` query
//! parameters, and authenticated with the project API key plus the bearer token of the signed-in user.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use url::Url;

use crate::config::BackendConfig;
use crate::error::CalendarError;
use crate::record::{NewRecord, OwnerId, RecordFields, RecordId, TaskRecord};
use crate::session::Session;
use crate::traits::RecordStore;

/// Ask the backend to send the affected rows back
const RETURN_REPRESENTATION: &str = "return=representation";


#[derive(Serialize)]
struct InsertRow<'a> {
    user_id: &'a OwnerId,
    task: &'a str,
    description: &'a str,
    date: String,
    category: &'a str,
    is_complete: bool,
}

#[derive(Serialize)]
struct UpdateRow<'a> {
    task: &'a str,
    description: &'a str,
    date: String,
    category: &'a str,
    is_complete: bool,
}

#[derive(Serialize)]
struct CompletionRow {
    is_complete: bool,
}


/// A [`RecordStore`] backed by the remote REST API
pub struct RestClient {
    config: BackendConfig,
    http: reqwest::Client,
}

impl RestClient {
    /// Create a client. This does not start a connection
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Create a client configured from the environment (see [`BackendConfig::from_env`])
    pub fn from_env() -> Result<Self, CalendarError> {
        Ok(Self::new(BackendConfig::from_env()?))
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// The URL of the record table, with PostgREST filters
    fn table_url(&self, filters: &[(&str, String)]) -> Result<Url, CalendarError> {
        let mut url = self.config.url().join(&format!("rest/v1/{}", self.config.table()))?;
        if filters.is_empty() == false {
            let mut pairs = url.query_pairs_mut();
            for (column, condition) in filters {
                pairs.append_pair(column, condition);
            }
        }
        Ok(url)
    }

    fn owner_filter(session: &Session) -> (&'static str, String) {
        ("user_id", format!("eq.{}", session.user_id()))
    }

    fn id_filter(id: &RecordId) -> (&'static str, String) {
        ("id", format!("eq.{}", id))
    }

    fn request(&self, method: Method, url: Url, session: &Session) -> Result<RequestBuilder, CalendarError> {
        session.ensure_active()?;
        log::debug!("{} {}", method, url);
        Ok(self.http.request(method, url)
            .header("apikey", self.config.api_key())
            .bearer_auth(session.access_token()))
    }

    async fn send(builder: RequestBuilder) -> Result<Response, CalendarError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            log::warn!("The backend rejected our credentials ({:?})", status);
            return Err(CalendarError::Unauthenticated);
        }
        if status.is_success() == false {
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::RemoteFailure(format!("Unexpected HTTP status code {:?}: {}", status, body)));
        }
        Ok(response)
    }

    async fn send_for_rows(builder: RequestBuilder) -> Result<Vec<TaskRecord>, CalendarError> {
        let response = Self::send(builder.header("Prefer", RETURN_REPRESENTATION)).await?;
        let text = response.text().await?;
        let rows = serde_json::from_str(&text)?;
        Ok(rows)
    }
}

#[async_trait]
impl RecordStore for RestClient {
    async fn list_records(&self, session: &Session) -> Result<Vec<TaskRecord>, CalendarError> {
        let url = self.table_url(&[
            ("select", "*".to_string()),
            Self::owner_filter(session),
        ])?;
        let response = Self::send(self.request(Method::GET, url, session)?).await?;
        let text = response.text().await?;
        let records: Vec<TaskRecord> = serde_json::from_str(&text)?;
        log::info!("Fetched {} records for user {}", records.len(), session.user_id());
        Ok(records)
    }

    async fn create_record(&self, session: &Session, record: NewRecord) -> Result<TaskRecord, CalendarError> {
        let url = self.table_url(&[])?;
        let row = InsertRow {
            user_id: session.user_id(),
            task: &record.title,
            description: &record.description,
            date: record.due.to_string(),
            category: &record.category,
            is_complete: false,
        };
        let builder = self.request(Method::POST, url, session)?.json(&[row]);

        match Self::send_for_rows(builder).await?.into_iter().next() {
            Some(created) => {
                log::info!("Created record {}", created.id);
                Ok(created)
            },
            None => Err(CalendarError::RemoteFailure("the backend did not return the created record".to_string())),
        }
    }

    async fn update_record(&self, session: &Session, id: &RecordId, fields: RecordFields) -> Result<(), CalendarError> {
        let url = self.table_url(&[Self::id_filter(id), Self::owner_filter(session)])?;
        let row = UpdateRow {
            task: &fields.title,
            description: &fields.description,
            date: fields.due.to_string(),
            category: &fields.category,
            is_complete: fields.completed,
        };
        let builder = self.request(Method::PATCH, url, session)?.json(&row);

        if Self::send_for_rows(builder).await?.is_empty() {
            return Err(CalendarError::RemoteFailure(format!("no record {} to update", id)));
        }
        Ok(())
    }

    async fn delete_record(&self, session: &Session, id: &RecordId) -> Result<(), CalendarError> {
        let url = self.table_url(&[Self::id_filter(id), Self::owner_filter(session)])?;
        Self::send(self.request(Method::DELETE, url, session)?).await?;
        log::info!("Deleted record {}", id);
        Ok(())
    }

    async fn set_completion(&self, session: &Session, id: &RecordId, completed: bool) -> Result<(), CalendarError> {
        let url = self.table_url(&[Self::id_filter(id), Self::owner_filter(session)])?;
        let builder = self.request(Method::PATCH, url, session)?.json(&CompletionRow { is_complete: completed });

        if Self::send_for_rows(builder).await?.is_empty() {
            return Err(CalendarError::RemoteFailure(format!("no record {} to update", id)));
        }
        Ok(())
    }

    async fn delete_completed(&self, session: &Session) -> Result<usize, CalendarError> {
        let url = self.table_url(&[
            ("is_complete", "eq.true".to_string()),
            Self::owner_filter(session),
        ])?;
        let deleted = Self::send_for_rows(self.request(Method::DELETE, url, session)?).await?;
        log::info!("Deleted {} completed records", deleted.len());
        Ok(deleted.len())
    }

    async fn delete_all(&self, session: &Session) -> Result<(), CalendarError> {
        let url = self.table_url(&[Self::owner_filter(session)])?;
        Self::send(self.request(Method::DELETE, url, session)?).await?;
        log::info!("Deleted every record of user {}", session.user_id());
        Ok(())
    }
}
