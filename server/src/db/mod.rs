//! SQLite persistence through Diesel: pool, embedded migrations, schema and
//! row types.

pub mod connection;
pub mod model;
pub mod schema;

pub use connection::{create_pool, run_migrations, DbPool};
