#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod adapter;
mod app;
pub mod credentials;
mod error;
pub mod model;
mod options;
pub mod password;
pub mod session;
mod util;
pub mod web;

pub use {
    app::{Builder, Server},
    credentials::{backend::Backend, Credentials, CredentialsProvider, CREDENTIALS_PROVIDER_ID},
    error::Error,
    options::AuthOptions,
    session::{get_server_auth_session, ServerAuthSession, Session, SessionUser, Token},
    util::{
        init_tracing, Config, DatabaseConfig, LoggerConfig, Routes, SameSiteConfig,
        SessionConfig, Verbosity, WebsiteConfig,
    },
};
