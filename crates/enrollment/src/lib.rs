//! Enrollment dataset core: one active CSV dataset, validation, summary
//! statistics, historical lookup and the enrollment estimate heuristic.

pub mod error;
pub mod schema;
pub mod catalog;
pub mod table;
pub mod validator;
pub mod store;
pub mod analyzer;
pub mod lookup;
pub mod estimator;

pub use error::*;
pub use schema::*;
pub use catalog::*;
pub use table::*;
pub use validator::*;
pub use store::*;
pub use analyzer::*;
pub use lookup::*;
pub use estimator::*;
