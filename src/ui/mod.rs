// file: src/ui/mod.rs
// description: terminal chat interface module exports
// reference: internal module structure

pub mod input;
pub mod render;
mod shell;

pub use input::{LineSource, ReaderInput, TerminalInput, stdin_source};
pub use shell::ChatShell;
