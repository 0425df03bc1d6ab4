//! Report schedule control

pub mod init;

pub use init::init;
