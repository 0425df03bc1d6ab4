pub mod error;
pub mod request;

pub use error::{handle_domain_error, handle_dto_validation, json_error_handler, unauthorized};
pub use request::extract_client_ip;
