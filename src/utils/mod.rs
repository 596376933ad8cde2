pub mod error;
pub mod format;
pub mod jwt;
pub mod swagger_doc;
pub mod tracking_code;
