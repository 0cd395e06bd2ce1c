pub mod chat;
pub mod error;
pub mod invite;
pub mod response;
pub mod team;
pub mod token;
pub mod user;
