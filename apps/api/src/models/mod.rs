pub mod github;
pub mod profile;
pub mod project;
