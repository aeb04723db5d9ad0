pub mod broadcast_service;
pub mod email_provider;
pub mod personalizer;
pub mod substitution;
pub mod template_store;

pub use broadcast_service::*;
pub use email_provider::*;
pub use personalizer::*;
pub use substitution::*;
pub use template_store::*;
