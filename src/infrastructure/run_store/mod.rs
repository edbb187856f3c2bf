//! Run store implementations

mod in_memory;
mod postgres;

pub use in_memory::InMemoryRunRepository;
pub use postgres::{PostgresConfig, PostgresRunRepository};
