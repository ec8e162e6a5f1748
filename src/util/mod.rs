mod config;
mod logging;

pub use {
    self::config::{
        Config, DatabaseConfig, LoggerConfig, Routes, SameSiteConfig, SessionConfig, Verbosity,
        WebsiteConfig,
    },
    self::logging::init_tracing,
};
