pub mod catalog;
pub mod errors;
pub mod import;
pub mod logging;
