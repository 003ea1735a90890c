mod config;
mod error;
mod types;
mod utils;

pub use config::*;
pub use error::Error;
pub use types::*;
pub use utils::*;
