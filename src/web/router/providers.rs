use axum::routing::get;

use super::AuthRouter;

pub fn router(providers_path: &str) -> AuthRouter {
    AuthRouter::new().route(providers_path, get(self::get::providers))
}

mod get {
    use std::sync::Arc;

    use {
        axum::{extract::State, response::Json},
        serde_json::{json, Value},
    };

    use crate::{AuthOptions, Error};

    use super::super::credentials_callback_path;

    pub async fn providers(State(options): State<Arc<AuthOptions>>) -> Result<Json<Value>, Error> {
        let provider = &options.provider;
        let signin_url = options.base_url.join(&options.routes.signin)?;
        let callback_url = options
            .base_url
            .join(&credentials_callback_path(&options.routes))?;

        Ok(Json(json!({
            provider.id: {
                "id": provider.id,
                "name": provider.name,
                "type": provider.kind,
                "signinUrl": signin_url.as_str(),
                "callbackUrl": callback_url.as_str(),
            }
        })))
    }
}
