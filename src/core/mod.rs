pub mod awards;
pub mod errors;
pub mod models;
pub mod policy;
pub mod services;
pub mod settlement;
