pub use super::guild_config::Entity as GuildConfig;
pub use super::temp_role::Entity as TempRole;
