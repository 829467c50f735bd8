pub mod auth;
pub mod health;
pub mod notes;
pub mod users;

pub use auth::*;
pub use health::*;
pub use notes::*;
pub use users::*;
