//! mail-sorter — LLM email classification relay and folder-routing workflow.

pub mod config;
pub mod error;
pub mod llm;
pub mod mail;
pub mod relay;
pub mod workflow;
