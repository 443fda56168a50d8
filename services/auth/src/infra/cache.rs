use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;

use crate::domain::repository::SessionStore;
use crate::domain::session::SessionContext;
use crate::error::AuthServiceError;

/// Session contexts as JSON strings under `session:{id}` with a sliding TTL.
#[derive(Clone)]
pub struct RedisSessionStore {
    pub pool: Pool,
    pub ttl_secs: u64,
}

fn session_key(session_id: &str) -> String {
    format!("session:{session_id}")
}

impl RedisSessionStore {
    async fn conn(&self) -> Result<deadpool_redis::Connection, AuthServiceError> {
        self.pool
            .get()
            .await
            .map_err(|e| AuthServiceError::StoreUnavailable(e.into()))
    }
}

impl SessionStore for RedisSessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<SessionContext>, AuthServiceError> {
        let mut conn = self.conn().await?;
        let value: Option<String> = conn
            .get(session_key(session_id))
            .await
            .map_err(|e| AuthServiceError::StoreUnavailable(e.into()))?;
        let Some(json) = value else {
            return Ok(None);
        };
        // A context written by an incompatible build is treated as expired.
        match serde_json::from_str(&json) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session context");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &SessionContext) -> Result<(), AuthServiceError> {
        let json = serde_json::to_string(session)
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let mut conn = self.conn().await?;
        let (): () = conn
            .set_ex(session_key(&session.id), json, self.ttl_secs)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| {
                AuthServiceError::StoreUnavailable(e.into())
            })?;
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<(), AuthServiceError> {
        let mut conn = self.conn().await?;
        let (): () = conn
            .del(session_key(session_id))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| {
                AuthServiceError::StoreUnavailable(e.into())
            })?;
        Ok(())
    }
}
