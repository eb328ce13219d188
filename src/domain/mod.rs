pub mod error;
pub mod model;
pub mod records;
pub mod traits;
