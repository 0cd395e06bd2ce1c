use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_MEMBERS: i32 = 4;
pub const MIN_MAX_MEMBERS: i32 = 2;
pub const MAX_MAX_MEMBERS: i32 = 10;

#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: String,
    pub leader_id: Uuid,
    pub max_members: i32,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::LeaderId",
        to   = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Leader,
    #[sea_orm(has_many = "super::team_invite::Entity")]
    Invitations,
    #[sea_orm(has_many = "super::message::Entity")]
    Messages,
}

impl Related<super::team_invite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invitations.def()
    }
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_led_by(&self, user_id: Uuid) -> bool {
        self.leader_id == user_id
    }
}
