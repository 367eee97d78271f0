//! Database access for the Encore backend

pub mod init;

pub use init::init_database;
