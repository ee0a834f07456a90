pub mod app;
pub mod config;
pub mod data;
pub mod document;
pub mod error;
pub mod grading;
pub mod markup;
pub mod model;
pub mod view_models;

#[cfg(not(target_arch = "wasm32"))]
pub mod ui;
#[cfg(target_arch = "wasm32")]
mod web;

pub use app::QuizEngine;
