//! HTTP Handlers

mod generation;
mod models;
mod ping;

pub use generation::*;
pub use models::*;
pub use ping::*;
