use std::sync::Arc;

use {
    axum::Router,
    tokio::{net::TcpListener, signal},
    tracing::{error, info},
};

use crate::{util::Config, AuthOptions, Error};

pub struct Server {
    pub router: Router,
    pub options: Arc<AuthOptions>,
    pub config: Config,
}

impl Server {
    /// Serves until Ctrl-C is received.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind address cannot be bound or serving fails.
    pub async fn serve(self) -> Result<(), Error> {
        let listener = TcpListener::bind(&self.config.website.bind_address).await?;
        info!(address = %listener.local_addr()?, "Listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => error!(err = %err, "Failed to listen for shutdown signal"),
    }
}
