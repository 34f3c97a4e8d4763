//! Database access: initialization, schema creation, and migrations

mod init;
mod migrations;

pub use init::{apply_schema, ensure_setting, get_setting, init_database};
pub use migrations::run_migrations;
