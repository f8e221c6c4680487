//! Polypharmic risk score assistant: prompt a chat-completion model about OTC
//! medications and render its answers in a small web form.

pub mod api;
pub mod assess;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod llm;
pub mod logging;
pub mod ui;
