//! Query embedding client

pub mod client;

pub use client::EmbeddingClient;
