pub mod db_service;
pub mod messages;
pub mod team_invite;
pub mod teams;
pub mod user;
