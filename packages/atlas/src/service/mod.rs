//! Business rules for each aggregate.
//!
//! Services borrow a connection for one request. Operations that touch more
//! than one row open their own transaction; blob cleanup runs only after the
//! transaction has committed.

pub mod algorithm;
pub mod application_area;
pub mod computing_resource_type;
pub mod concrete_solution;
pub mod file;
pub mod implementation;
pub mod implementation_package;
pub mod provider;
pub mod publication;
