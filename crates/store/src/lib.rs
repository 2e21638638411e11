pub mod identity;
pub mod mailmap;

pub use identity::models::Identity;
