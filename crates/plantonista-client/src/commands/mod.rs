pub mod common;
pub mod dash;
pub mod expense;
pub mod income;
pub mod plan;
pub mod profile;
pub mod registry;
pub mod statement;
