use std::path::PathBuf;

use clap::{Parser, Subcommand};
use grafton_credentials::{
    adapter::SqlxAdapter, init_tracing, model::NewUser, password::hash_password, Builder, Config,
    Error,
};
use tracing::info;

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Directory holding `default.toml` and an optional `local.toml`
    #[clap(long, value_name = "DIR", env = "GRAFTON_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the auth routes
    Serve,
    #[command(arg_required_else_help = true)]
    User {
        #[command(subcommand)]
        cmd: UserCmd,
    },
}

#[derive(Debug, Subcommand)]
enum UserCmd {
    #[command(arg_required_else_help = true)]
    /// Creates a user; without a password the account cannot use credentials sign-in
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    #[command(arg_required_else_help = true)]
    /// Sets the password for the user
    Password {
        #[arg(long)]
        email: String,
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Cli::parse();
    let config = Config::load_from_dir(&args.config_dir)?;
    init_tracing(&config.logger);

    match args.command {
        Commands::Serve => Builder::new(config)?.build().await?.serve().await,
        Commands::User { cmd } => {
            let adapter = SqlxAdapter::connect(&config.database).await?;
            if config.database.run_migrations {
                adapter.migrate().await?;
            }
            parse_user(&adapter, cmd).await
        }
    }
}

async fn parse_user(adapter: &SqlxAdapter, cmd: UserCmd) -> Result<(), Error> {
    match cmd {
        UserCmd::Create {
            email,
            name,
            password,
        } => {
            let password_hash = match password {
                Some(password) => Some(hash_password(&password).await?),
                None => None,
            };
            let user = adapter
                .create_user(NewUser {
                    name,
                    email,
                    image: None,
                    password_hash,
                })
                .await?;
            info!(user_id = %user.id, "User created");
            println!("{}", user.id);
        }
        UserCmd::Password { email, password } => {
            let user = adapter
                .get_user_by_email(&email)
                .await?
                .ok_or_else(|| Error::UserNotFound(email.clone()))?;
            let hash = hash_password(&password).await?;
            adapter.set_password(&user.id, Some(&hash)).await?;
            info!(user_id = %user.id, "Password updated");
        }
    }
    Ok(())
}
