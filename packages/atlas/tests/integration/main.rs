mod algorithm;
mod common;
mod computing_resource_type;
mod concrete_solution;
mod implementation;
mod provider;
mod publication;
