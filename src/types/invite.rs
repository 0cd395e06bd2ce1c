use chrono::{DateTime, Utc};
use entity::team_invite::{InvitationStatus, Model as InviteModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a lookup-or-create. The first call for a key creates the row;
/// every later call while the row still matches gets it back untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Ensured<T> {
    Created(T),
    Existing(T),
}

impl<T> Ensured<T> {
    pub fn was_created(&self) -> bool {
        matches!(self, Ensured::Created(_))
    }

    pub fn get(&self) -> &T {
        match self {
            Ensured::Created(v) | Ensured::Existing(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Ensured::Created(v) | Ensured::Existing(v) => v,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InvitationView {
    pub id: i32,
    pub team_id: i32,
    pub invited_user_id: Uuid,
    pub invited_username: String,
    pub message: String,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
}

impl InvitationView {
    pub fn new(inv: &InviteModel, invited_username: String) -> Self {
        InvitationView {
            id: inv.id,
            team_id: inv.team_id,
            invited_user_id: inv.invited_user_id,
            invited_username,
            message: inv.message.clone(),
            status: inv.status,
            created_at: inv.created_at,
        }
    }
}

pub fn join_request_message(username: &str) -> String {
    format!("User {} wants to join the team", username)
}
