pub mod observability;
pub mod provider;
