//! Import aggregate: the upload lifecycle reducer and the push-channel
//! progress event model.

pub mod progress;
pub mod session;

pub use progress::*;
pub use session::*;
