pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::{ChatController, ChatError, SendOptions};
