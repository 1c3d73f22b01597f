//! Persistent catalog schema.
//!
//! Relations are plain foreign-key columns or junction tables; nothing is
//! loaded implicitly, related rows are fetched through `crate::repository`.

pub mod algorithm;
pub mod algorithm_application_area;
pub mod algorithm_publication;
pub mod application_area;
pub mod computing_resource_type;
pub mod concrete_solution;
pub mod file;
pub mod implementation;
pub mod implementation_package;
pub mod implementation_package_file;
pub mod implementation_publication;
pub mod provider;
pub mod publication;
pub mod qpu;
