//! The authenticated principal that record operations run on behalf of
//!
//! Signing in is handled by the backend's authentication service, outside of this crate.
//! The resulting session is handed to every operation explicitly, so that nothing here depends on ambient state.

use chrono::{DateTime, Utc};

use crate::error::CalendarError;
use crate::record::OwnerId;

#[derive(Clone, Debug)]
pub struct Session {
    user_id: OwnerId,
    access_token: String,
    expires_at: Option<DateTime<Utc>>,
    email: Option<String>,
}

impl Session {
    pub fn new<T: ToString>(user_id: OwnerId, access_token: T) -> Self {
        Self {
            user_id,
            access_token: access_token.to_string(),
            expires_at: None,
            email: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn user_id(&self) -> &OwnerId { &self.user_id }
    pub fn access_token(&self) -> &str { &self.access_token }
    pub fn expires_at(&self) -> Option<&DateTime<Utc>> { self.expires_at.as_ref() }
    pub fn email(&self) -> Option<&str> { self.email.as_deref() }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.access_token.is_empty() == false
            && self.expires_at.map(|exp| now < exp).unwrap_or(true)
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    /// Fails with `Unauthenticated` unless this session can still be used
    pub fn ensure_active(&self) -> Result<(), CalendarError> {
        if self.is_active() {
            Ok(())
        } else {
            log::warn!("Session of user {} is no longer active", self.user_id);
            Err(CalendarError::Unauthenticated)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn activity() {
        let now = Utc::now();
        let session = Session::new(OwnerId::new("u1"), "token");
        assert!(session.is_active_at(now));

        let expired = session.clone().with_expiry(now - Duration::minutes(1));
        assert!(expired.is_active_at(now) == false);
        assert!(matches!(expired.ensure_active(), Err(CalendarError::Unauthenticated)));

        let later = session.with_expiry(now + Duration::hours(1)).with_email("me@example.com");
        assert!(later.ensure_active().is_ok());
        assert_eq!(later.email(), Some("me@example.com"));

        let anonymous = Session::new(OwnerId::new("u1"), "");
        assert!(anonymous.ensure_active().is_err());
    }
}
