mod schema;
mod server;

pub use schema::parse_create_author;
pub use server::{router, HttpServer, HttpServerConfig, GREETING};
