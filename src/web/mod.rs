use std::sync::Arc;

use axum::Router;

use crate::AuthOptions;

mod protected;
pub mod router;

pub use {protected::protect, router::create_auth_router};

pub type AuthRouter = Router<Arc<AuthOptions>>;
