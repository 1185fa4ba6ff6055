pub mod expiry_timers;
pub mod temp_roles;
