//! Core functionality for the presentation model, export, and configuration

pub mod attachment;
pub mod config;
pub mod error;
pub mod export;
pub mod presentation;
pub mod session;
