pub mod app_settings;
pub mod app_state;
pub mod fetch;
pub mod messages;
pub mod network;
