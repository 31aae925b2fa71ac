// src/ports/mod.rs
pub mod http;
pub mod shell;

pub use shell::AppShell;
