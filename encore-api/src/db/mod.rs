//! Database access for encore-api
//!
//! One module per collection. The albums/videos/tours modules are ordinary
//! CRUD; settings/hero/about follow the singleton accessor pattern
//! (atomic find-or-insert, then shallow-merge updates).

pub mod about;
pub mod albums;
pub mod hero;
pub mod settings;
pub mod tours;
pub mod videos;
