pub mod broadcast;
pub mod template;
pub mod user;

pub use broadcast::*;
pub use template::*;
pub use user::*;
