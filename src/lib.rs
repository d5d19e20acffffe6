pub mod author;
pub mod config;
pub mod infer;
pub mod prompts;
pub mod service;
pub mod story;
pub mod web;
