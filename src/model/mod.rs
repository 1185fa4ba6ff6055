//! Domain models.
//!
//! Repositories convert SeaORM entity models into these types at the data boundary so that
//! services work with Discord-shaped `u64` IDs and never touch database structures.

pub mod guild_config;
pub mod temp_role;
