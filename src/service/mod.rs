pub mod discord;
pub mod guild_config;
pub mod moderation_log;
pub mod temp_role;
