//! Product catalog aggregate containing entities, aggregation and pagination.

pub mod aggregation;
pub mod entities;
pub mod pagination;

pub use aggregation::*;
pub use entities::*;
pub use pagination::*;
