use std::str::FromStr;

use {
    sqlx::{
        sqlite::{SqliteConnectOptions, SqlitePoolOptions},
        SqlitePool,
    },
    tracing::debug,
};

use crate::{
    model::{CredentialRecord, NewUser, User},
    util::DatabaseConfig,
    Error,
};

/// Binds the auth layer to the `users` table of a SQLite database.
#[derive(Debug, Clone)]
pub struct SqlxAdapter {
    db: SqlitePool,
}

impl SqlxAdapter {
    pub const fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Opens a pool for `config.url`, creating the database file if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the url is invalid or the database cannot be opened.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, Error> {
        debug!(url = %config.url, "Connecting to database");

        let connect_options =
            SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
        let db = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(connect_options)
            .await?;

        Ok(Self { db })
    }

    /// # Errors
    ///
    /// Returns an error if a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), Error> {
        debug!("Running database migrations");
        sqlx::migrate!().run(&self.db).await?;
        Ok(())
    }

    pub const fn pool(&self) -> &SqlitePool {
        &self.db
    }

    /// Returns the first user whose email matches, selecting only the columns
    /// needed to check a password.
    pub async fn find_credential_record(
        &self,
        email: &str,
    ) -> Result<Option<CredentialRecord>, Error> {
        sqlx::query_as::<_, CredentialRecord>(
            "select id, email, password from users where email = ? limit 1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(Error::Sqlx)
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, Error> {
        sqlx::query_as("select id, name, email, image, password from users where id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(Error::Sqlx)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        sqlx::query_as(
            "select id, name, email, image, password from users where email = ? limit 1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(Error::Sqlx)
    }

    pub async fn create_user(&self, new_user: NewUser) -> Result<User, Error> {
        let user: User = sqlx::query_as(
            r"
            insert into users (name, email, image, password)
            values (?, ?, ?, ?)
            returning id, name, email, image, password
            ",
        )
        .bind(new_user.name)
        .bind(new_user.email)
        .bind(new_user.image)
        .bind(new_user.password_hash)
        .fetch_one(&self.db)
        .await?;

        debug!(user_id = %user.id, "Created user");
        Ok(user)
    }

    /// Replaces the stored hash. Passing `None` turns the account into one
    /// that can no longer sign in with credentials.
    pub async fn set_password(
        &self,
        id: &str,
        password_hash: Option<&str>,
    ) -> Result<bool, Error> {
        let result = sqlx::query("update users set password = ? where id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
