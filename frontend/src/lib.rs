pub mod app;
pub mod editor;
pub mod filter;
pub mod gateway;
pub mod sidebar;
pub mod state;
pub mod structs;
