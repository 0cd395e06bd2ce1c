pub mod message;
pub mod team;
pub mod team_invite;
pub mod user;

/*
 A user belongs to at most one team (user.team_id). The team leader is the
 user who created it and is always a member. Joining goes through a
 team_invite row: the user asks, the leader accepts or declines.
 Messages hang directly off the team; there is no separate chat room row.
 */
