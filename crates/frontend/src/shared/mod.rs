pub mod api_utils;
pub mod config;
pub mod date_utils;
pub mod dom;
pub mod flash;
pub mod form_validator;
pub mod request_slot;
pub mod styles;
