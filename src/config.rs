//! Support for library configuration options

use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use url::Url;

use crate::error::CalendarError;

/// Name of the backend table that holds the task records.
/// Feel free to override it when initing this library.
pub static TABLE_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("todos".to_string())));

/// Environment variable holding the base URL of the backend
pub const URL_VAR: &str = "CALENDAR_TODO_URL";
/// Environment variable holding the public API key of the backend
pub const API_KEY_VAR: &str = "CALENDAR_TODO_API_KEY";
/// Optional environment variable overriding [`TABLE_NAME`]
pub const TABLE_VAR: &str = "CALENDAR_TODO_TABLE";

fn default_table() -> String {
    match TABLE_NAME.lock() {
        Ok(name) => name.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}


/// Where the backend lives, and how to reach its record table
#[derive(Clone, Debug, PartialEq)]
pub struct BackendConfig {
    url: Url,
    api_key: String,
    table: String,
}

impl BackendConfig {
    pub fn new<S: AsRef<str>, T: ToString>(url: S, api_key: T) -> Result<Self, CalendarError> {
        let mut url = Url::parse(url.as_ref())?;
        // So that joining relative paths does not replace the last segment
        if url.path().ends_with('/') == false {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            url,
            api_key: api_key.to_string(),
            table: default_table(),
        })
    }

    pub fn with_table<S: Into<String>>(mut self, table: S) -> Self {
        self.table = table.into();
        self
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, CalendarError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, CalendarError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(URL_VAR).ok_or_else(|| CalendarError::Config(format!("{} is not set", URL_VAR)))?;
        let api_key = lookup(API_KEY_VAR).ok_or_else(|| CalendarError::Config(format!("{} is not set", API_KEY_VAR)))?;
        let config = Self::new(url, api_key)?;
        Ok(match lookup(TABLE_VAR) {
            Some(table) if table.is_empty() == false => config.with_table(table),
            _ => config,
        })
    }

    pub fn url(&self) -> &Url { &self.url }
    pub fn api_key(&self) -> &str { &self.api_key }
    pub fn table(&self) -> &str { &self.table }
}
