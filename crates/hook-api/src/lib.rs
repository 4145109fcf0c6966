//! Webhook logger HTTP front: capture any request under /wh, view captures at /ui.

pub mod capture;
pub mod config;
pub mod render;
pub mod server;
pub mod sink;
