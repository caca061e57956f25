pub mod capability;
pub mod dashboard;
pub mod date;
pub mod profile;
pub mod recurrence;
pub mod registry;
pub mod statement;
pub mod status;
pub mod types;
pub mod validate;
