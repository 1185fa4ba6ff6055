//! Database repository layer.
//!
//! Repositories perform all queries, inserts, updates and deletes, using SeaORM entity
//! models internally and returning domain models from `crate::model`.

pub mod guild_config;
pub mod temp_role;
