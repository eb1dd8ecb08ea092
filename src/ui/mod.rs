pub mod components;
pub mod format;
pub mod state;
