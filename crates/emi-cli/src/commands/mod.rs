pub mod currency;
pub mod housing;
pub mod loan;
pub mod quote;
