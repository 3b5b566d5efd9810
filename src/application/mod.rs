pub mod catalog_store;
pub mod change_feed;
pub mod chart_refresh;

pub use catalog_store::*;
pub use change_feed::*;
pub use chart_refresh::*;
