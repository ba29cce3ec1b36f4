//! Server-side AI features (classification, moderation, embeddings)

pub mod ports;
