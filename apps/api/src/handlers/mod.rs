pub mod dashboard;
pub mod health;
pub mod roles;
pub mod users;
