use std::sync::Arc;

use {
    sqlx::SqlitePool,
    tower_http::trace::TraceLayer,
    tracing::{debug, info},
};

use crate::{
    adapter::SqlxAdapter,
    credentials::backend::Backend,
    session::Callbacks,
    util::Config,
    web::{create_auth_router, protect, AuthRouter},
    AuthOptions, Error,
};

use super::Server;

type RouterFactory = dyn FnOnce(&Arc<AuthOptions>) -> AuthRouter + Send + 'static;

pub struct Builder {
    config: Config,
    pool: Option<SqlitePool>,
    callbacks: Option<Callbacks>,
    protected_router_factory: Option<Box<RouterFactory>>,
    unprotected_router_factory: Option<Box<RouterFactory>>,
}

impl Builder {
    /// # Errors
    ///
    /// Returns `MissingSecret` if the config has no signing secret.
    pub fn new(config: Config) -> Result<Self, Error> {
        debug!(
            bind_address = %config.website.bind_address,
            database = %config.database.url,
            "Initializing Builder"
        );

        if config.secret.is_empty() {
            return Err(Error::MissingSecret);
        }

        Ok(Self {
            config,
            pool: None,
            callbacks: None,
            protected_router_factory: None,
            unprotected_router_factory: None,
        })
    }

    /// Use an existing pool instead of connecting to `database.url`.
    #[must_use]
    pub fn with_pool(mut self, pool: SqlitePool) -> Self {
        self.pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = Some(callbacks);
        self
    }

    #[must_use]
    pub fn with_unprotected_router<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(&Arc<AuthOptions>) -> AuthRouter + Send + 'static,
    {
        self.unprotected_router_factory = Some(Box::new(factory));
        self
    }

    /// Routes built by `factory` redirect to the sign-in page unless the
    /// request carries a valid session.
    #[must_use]
    pub fn with_protected_router<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(&Arc<AuthOptions>) -> AuthRouter + Send + 'static,
    {
        self.protected_router_factory = Some(Box::new(factory));
        self
    }

    /// # Errors
    ///
    /// Returns an error if the database cannot be reached or migrated, or the
    /// config does not resolve into valid auth options.
    pub async fn build(self) -> Result<Server, Error> {
        let adapter = match self.pool {
            Some(pool) => SqlxAdapter::new(pool),
            None => SqlxAdapter::connect(&self.config.database).await?,
        };

        if self.config.database.run_migrations {
            adapter.migrate().await?;
        }

        let backend = Backend::new(adapter).await?;
        let mut options = AuthOptions::new(&self.config, backend)?;
        if let Some(callbacks) = self.callbacks {
            options = options.with_callbacks(callbacks);
        }
        let options = Arc::new(options);

        let mut router = create_auth_router(&options.routes);

        if let Some(factory) = self.protected_router_factory {
            router = router.merge(protect(factory(&options), options.clone()));
        }

        if let Some(factory) = self.unprotected_router_factory {
            router = router.merge(factory(&options));
        }

        let router = router
            .layer(TraceLayer::new_for_http())
            .with_state(options.clone());

        info!("App successfully initialized");

        Ok(Server {
            router,
            options,
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::util::DatabaseConfig;

    use super::*;

    #[test]
    fn builder_requires_secret() {
        assert!(matches!(
            Builder::new(Config::default()),
            Err(Error::MissingSecret)
        ));
    }

    #[tokio::test]
    async fn build_connects_and_migrates_from_config() {
        let config = Config {
            secret: "test-secret".to_string(),
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                run_migrations: true,
            },
            ..Config::default()
        };

        let server = Builder::new(config).unwrap().build().await.unwrap();
        let adapter = server.options.backend().adapter();

        assert!(adapter
            .find_credential_record("nobody@x.com")
            .await
            .unwrap()
            .is_none());
    }
}
