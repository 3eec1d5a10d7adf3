pub mod auth;
pub mod menu;
pub mod permissions;
pub mod roles;
