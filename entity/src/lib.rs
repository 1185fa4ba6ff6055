//! SeaORM entities for the rolekeeper database.
//!
//! Each module mirrors one table created by the `migration` crate.

pub mod prelude;

pub mod guild_config;
pub mod temp_role;
