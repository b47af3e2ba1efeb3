pub mod error;
pub mod estimator;
pub mod pricing;
pub mod scenarios;
pub mod schema;

pub use error::{ConfigurationError, Lookup, PricingNotFound, Result};
pub use estimator::*;
pub use pricing::*;
pub use scenarios::*;
pub use schema::*;
