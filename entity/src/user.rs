use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub token: String,
    pub role: Role,
    pub skills: String,
    pub about: String,
    pub team_id: Option<i32>,             // FK -> team.id (nullable)
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to   = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Team,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    #[sea_orm(string_value = "participant")]
    Participant,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Things a role may do beyond what membership or leadership already grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    CreateTeam,
    JoinTeam,
    UseChat,
    /// Edit, deactivate or delete a team without being its leader.
    ManageAnyTeam,
    ViewInactiveTeams,
}

const PARTICIPANT_CAPABILITIES: &[Capability] = &[
    Capability::CreateTeam,
    Capability::JoinTeam,
    Capability::UseChat,
];

const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::CreateTeam,
    Capability::JoinTeam,
    Capability::UseChat,
    Capability::ManageAnyTeam,
    Capability::ViewInactiveTeams,
];

impl Role {
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            Role::Participant => PARTICIPANT_CAPABILITIES,
            Role::Admin => ADMIN_CAPABILITIES,
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_cannot_manage_other_teams() {
        assert!(Role::Participant.can(Capability::JoinTeam));
        assert!(!Role::Participant.can(Capability::ManageAnyTeam));
        assert!(!Role::Participant.can(Capability::ViewInactiveTeams));
    }

    #[test]
    fn admin_has_every_capability() {
        for cap in [
            Capability::CreateTeam,
            Capability::JoinTeam,
            Capability::UseChat,
            Capability::ManageAnyTeam,
            Capability::ViewInactiveTeams,
        ] {
            assert!(Role::Admin.can(cap), "admin is missing {:?}", cap);
        }
    }

    #[test]
    fn default_role_is_participant() {
        assert_eq!(Role::default(), Role::Participant);
    }
}
