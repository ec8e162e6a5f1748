mod builder;
pub mod middleware;
mod server;

pub use {builder::Builder, server::Server};
