use entity::team::Model as TeamModel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::invite::InvitationView;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RTeamCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub max_members: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RTeamUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub max_members: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TeamCreateRes {
    pub id: i32,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MemberView {
    pub id: Uuid,
    pub username: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TeamSummary {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub leader_id: Uuid,
    pub member_count: u64,
    pub max_members: i32,
    pub is_full: bool,
    pub is_active: bool,
}

impl TeamSummary {
    pub fn new(team: &TeamModel, member_count: u64) -> Self {
        TeamSummary {
            id: team.id,
            name: team.name.clone(),
            description: team.description.clone(),
            leader_id: team.leader_id,
            member_count,
            max_members: team.max_members,
            is_full: member_count >= team.max_members as u64,
            is_active: team.is_active,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TeamListRes {
    pub teams: Vec<TeamSummary>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TeamDetail {
    pub team: TeamSummary,
    pub members: Vec<MemberView>,
    pub is_member: bool,
    pub is_leader: bool,
    /// Only filled in for the leader.
    pub pending_invitations: Vec<InvitationView>,
}
