pub mod algorithm;
pub mod application_area;
pub mod computing_resource_type;
pub mod concrete_solution;
pub mod file;
pub mod implementation;
pub mod implementation_package;
pub mod provider;
pub mod publication;
