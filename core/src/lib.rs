#![no_std]

extern crate alloc;

pub use config::*;
pub use content::*;
pub use engine::*;
pub use entropy::*;
pub use error::*;
pub use scheduler::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod config;
mod content;
mod engine;
mod entropy;
mod error;
mod scheduler;
mod session;
mod tile;
mod types;
