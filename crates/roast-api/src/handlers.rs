//! API request handlers.

pub mod files;
pub mod health;
pub mod roasts;

pub use files::serve_video;
pub use health::{health, ready};
pub use roasts::{clear_cache, create_roast};
