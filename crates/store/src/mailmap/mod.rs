//! Reading and applying existing `.mailmap` files.
//!
//! Line grammar: `CanonicalName? <canonical@email> (OldName? <old@email>)?`.
//! Emails are matched case-insensitively; names are matched exactly.

pub mod apply;
pub mod models;
pub mod parser;

pub use apply::apply_mailmap;
pub use models::{Mailmap, MailmapEntry};
pub use parser::parse_mailmap;
