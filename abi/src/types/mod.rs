mod booking;
mod pagination;
mod property;
mod query;
mod user;

pub use booking::*;
pub use pagination::*;
pub use property::*;
pub use query::*;
pub use user::*;
