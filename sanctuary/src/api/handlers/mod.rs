pub mod auth;
pub mod dashboard;
pub mod donations;
pub mod events;
pub mod health;
pub mod live_streams;
pub mod members;
pub mod ministries;
pub mod pastoral_visits;
pub mod users;
pub mod visitors;
