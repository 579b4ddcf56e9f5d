pub mod bot;
pub mod command;
pub mod config;
pub mod error;
pub mod inference;
pub mod reply;
pub mod types;

pub use bot::run;
