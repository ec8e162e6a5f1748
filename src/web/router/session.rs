use axum::routing::get;

use super::AuthRouter;

pub fn router(session_path: &str) -> AuthRouter {
    AuthRouter::new().route(session_path, get(self::get::session))
}

mod get {
    use {
        axum::response::Json,
        serde_json::{json, Value},
    };

    use crate::{session::ServerAuthSession, Error};

    pub async fn session(
        ServerAuthSession(session): ServerAuthSession,
    ) -> Result<Json<Value>, Error> {
        let body = match session {
            Some(session) => serde_json::to_value(session)
                .map_err(|e| Error::SerializationError(e.to_string()))?,
            None => json!({}),
        };
        Ok(Json(body))
    }
}
