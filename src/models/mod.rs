pub mod overrides;
pub mod project;
pub mod schedule;
pub mod settings;
pub mod summary;
