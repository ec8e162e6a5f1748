#![allow(clippy::module_name_repetitions)]

use std::path::Path;

use {
    ::config::{Config as ConfigLoader, Environment, File},
    derivative::Derivative,
    serde::{Deserialize, Serialize},
    strum::{Display, EnumString, VariantNames},
    tracing::debug,
};

use crate::{session::SessionStrategy, Error};

pub const ENV_PREFIX: &str = "GRAFTON";

#[derive(Debug, Serialize, Deserialize, Derivative, Clone)]
#[derivative(Default)]
#[serde(default)]
pub struct WebsiteConfig {
    #[derivative(Default(value = "\"127.0.0.1:3000\".into()"))]
    pub bind_address: String,
}

#[derive(Debug, Serialize, Deserialize, Derivative, Clone)]
#[derivative(Default)]
#[serde(default)]
pub struct DatabaseConfig {
    #[derivative(Default(value = "\"sqlite://grafton-credentials.db\".into()"))]
    pub url: String,
    #[derivative(Default(value = "5"))]
    pub max_connections: u32,
    #[derivative(Default(value = "true"))]
    pub run_migrations: bool,
}

#[derive(Debug, Serialize, Deserialize, Derivative, Clone)]
#[derivative(Default)]
#[serde(default)]
pub struct SessionConfig {
    pub strategy: SessionStrategy,
    /// Lifetime of an issued session token, in seconds.
    #[derivative(Default(value = "30 * 24 * 60 * 60"))]
    pub max_age_secs: i64,
    #[derivative(Default(value = "\"grafton.session-token\".into()"))]
    pub cookie_name: String,
    pub secure: bool,
    pub same_site_policy: SameSiteConfig,
}

#[derive(
    Default, Display, EnumString, VariantNames, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SameSiteConfig {
    Strict,
    #[default]
    Lax,
    None,
}

#[derive(
    Default, Display, EnumString, VariantNames, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

#[derive(Default, Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggerConfig {
    pub verbosity: Verbosity,
}

#[derive(Debug, Serialize, Deserialize, Derivative, Clone)]
#[derivative(Default)]
#[serde(default)]
pub struct Routes {
    #[derivative(Default(value = "\"/api/auth\".into()"))]
    pub root: String,
    #[derivative(Default(value = "\"signin\".into()"))]
    pub signin: String,
    #[derivative(Default(value = "\"signout\".into()"))]
    pub signout: String,
    #[derivative(Default(value = "\"session\".into()"))]
    pub session: String,
    #[derivative(Default(value = "\"providers\".into()"))]
    pub providers: String,
    #[derivative(Default(value = "\"callback\".into()"))]
    pub callback: String,
    #[derivative(Default(value = "\"error\".into()"))]
    pub error: String,
}

impl Routes {
    /// Returns a new `Routes` struct with the `root` path prepended to all paths.
    pub fn with_root(&self) -> Self {
        let normalized_base = normalize_slash(&self.root);
        Self {
            root: normalized_base.clone(),
            signin: join_paths(&normalized_base, &self.signin),
            signout: join_paths(&normalized_base, &self.signout),
            session: join_paths(&normalized_base, &self.session),
            providers: join_paths(&normalized_base, &self.providers),
            callback: join_paths(&normalized_base, &self.callback),
            error: join_paths(&normalized_base, &self.error),
        }
    }

    /// Path of the callback endpoint for one provider. Expects rooted routes.
    pub fn provider_callback(&self, provider: &str) -> String {
        join_paths(&self.callback, provider)
    }
}

fn normalize_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

fn join_paths(base: &str, path: &str) -> String {
    let trimmed_base = base.trim_end_matches('/');
    let trimmed_path = path.trim_start_matches('/');
    format!("{trimmed_base}/{trimmed_path}")
}

#[derive(Debug, Serialize, Deserialize, Derivative, Clone)]
#[derivative(Default)]
#[serde(default)]
pub struct Config {
    /// Key used to sign session tokens. Must be set.
    pub secret: String,
    /// Public origin of the application, used to validate redirect targets.
    #[derivative(Default(value = "\"http://localhost:3000\".into()"))]
    pub base_url: String,
    pub website: WebsiteConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub routes: Routes,
    pub logger: LoggerConfig,
}

impl Config {
    /// Loads `default.toml`, then `local.toml`, from `dir`, and finally
    /// `GRAFTON__`-prefixed environment variables. Every source is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or the merged
    /// values do not fit the config shape.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref();
        debug!(dir = %dir.display(), "Loading configuration");

        let config = ConfigLoader::builder()
            .add_source(File::from(dir.join("default.toml")).required(false))
            .add_source(File::from(dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
