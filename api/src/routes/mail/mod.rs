//! Mail transport diagnostics

pub mod test_email;

pub use test_email::send_test_email;
