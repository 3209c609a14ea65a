//! Data Transfer Objects for the web layer.

pub mod multipart;
pub mod request;
pub mod validation;

pub use multipart::MultipartFields;
pub use request::*;
pub use validation::ValidatedForm;
