//! Factory methods for creating test data.
//!
//! Factories insert entities with sensible defaults (taken from the fixtures) into the test
//! database, reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let grant = factory::create_temp_role(&db).await?;
//!
//! let config = factory::guild_config::GuildConfigFactory::new(&db, 1)
//!     .log_channel_id(Some(555))
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `temp_role` - Create temporary role grants
//! - `guild_config` - Create guild configuration rows
//! - `helpers` - Unique ID generation

pub mod guild_config;
pub mod helpers;
pub mod temp_role;

pub use guild_config::create_guild_config;
pub use temp_role::{create_temp_role, create_temp_role_expiring_at};
