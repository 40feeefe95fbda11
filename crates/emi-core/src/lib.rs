pub mod currency;
pub mod emi;
pub mod error;
pub mod types;

#[cfg(feature = "series")]
pub mod series;

#[cfg(feature = "housing")]
pub mod housing;

#[cfg(feature = "chart")]
pub mod chart;

#[cfg(feature = "session")]
pub mod bounds;

#[cfg(feature = "session")]
pub mod session;

pub use error::EmiError;
pub use types::*;

/// Standard result type for all EMI operations
pub type EmiResult<T> = Result<T, EmiError>;
