//! LLM Module - Ollama-backed text completion

pub mod ollama_client;

pub use ollama_client::{OllamaClient, LLM_ERROR_MARKER};
