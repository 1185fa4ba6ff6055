//! Test fixtures providing reusable test data without database insertion.
//!
//! Fixtures create in-memory entity models for unit tests and supply the defaults used by
//! the factories. Unlike factories, fixtures do NOT insert data into the database.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let grant = fixture::temp_role::entity();
//!
//! let later = fixture::temp_role::entity_builder()
//!     .expires_at(1_800_000_000)
//!     .build();
//! ```

pub mod guild_config;
pub mod temp_role;

pub use guild_config::{
    entity as guild_config_entity, entity_builder as guild_config_entity_builder,
};
pub use temp_role::{entity as temp_role_entity, entity_builder as temp_role_entity_builder};
