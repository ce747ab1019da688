pub mod buffer;
pub mod byte_size;
pub mod cmd;
pub mod config;
pub mod engine;
pub mod error;
pub mod event_loop_proxy;
pub mod keymap;
pub mod logger;
pub mod menu;
pub mod notes;
pub mod status_line;
