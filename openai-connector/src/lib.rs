//! openai-connector - A typed client for the OpenAI REST API
//!
//! This crate wraps the OpenAI HTTP endpoints behind a [`Client`] built from
//! a [`config::ConnectionConfig`]. Configuration sub-sections arrive as loose
//! JSON values and are narrowed into typed settings at resolution time, so a
//! malformed proxy or HTTP/2 block fails construction instead of the first
//! request. Multipart operations (audio, image edits, file uploads) describe
//! their bodies as ordered [`multipart::BodyPart`] lists before encoding.
//!
//! Each endpoint method performs exactly one request/response exchange; there
//! are no retries, streams or paginated iterators.

pub mod audio;
pub mod chat;
pub mod client;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod files;
pub mod fine_tunes;
pub mod images;
pub mod models;
pub mod moderations;
pub mod multipart;
pub mod prelude;

pub use client::Client;
pub use error::{Error, Result, TransportError};
