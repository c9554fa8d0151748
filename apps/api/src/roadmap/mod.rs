pub mod generator;
pub mod handlers;
pub mod skill_data;
