pub mod activity;
pub mod audit;
pub mod award;
pub mod event;
pub mod expense;
pub mod lore;
pub mod ritual;
pub mod settlement;
pub mod user;
