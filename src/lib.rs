pub mod animation;
pub mod app;
pub mod config;
pub mod data;
pub mod description;
pub mod error;
pub mod levels;
pub mod model;
pub mod progress;
pub mod session;
pub mod ui;
pub mod validator;
pub mod view_models;

pub use app::ArcadeApp;
pub use error::{ArcadeError, Result};
