//! Rolekeeper Test Utils
//!
//! Provides shared testing utilities for the rolekeeper bot. This crate offers a builder
//! pattern for creating test contexts with in-memory SQLite databases and customizable
//! table schemas, plus fixtures and factories for the bot's tables.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **fixture**: In-memory entity models (no database)
//! - **factory**: Entity models inserted into the test database
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::TempRole;
//!
//! #[tokio::test]
//! async fn test_temp_role_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(TempRole)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
