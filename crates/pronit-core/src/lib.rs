pub mod catalog;
pub mod config;
pub mod credential;
pub mod error;
pub mod hosting;
pub mod io;
pub mod paths;
pub mod retry;
pub mod scaffold;
pub mod terminal;
pub mod vcs;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use error::{ErrorKind, PronitError, Result};
