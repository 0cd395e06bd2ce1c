use actix_web::{web, App};
use entity::user::Role;
use hackathon_teams::{
    config::EnvConfig,
    db::{db_service::DbService, teams::NewTeam},
    types::{token::construct_token, user::DBUserCreate},
    utils::token::{encrypt, new_secret},
};
use std::sync::Arc;
use uuid::Uuid;

pub struct TestClient {
    pub db: Arc<DbService>,
    pub config: EnvConfig,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(db: Arc<DbService>, config: EnvConfig) -> Self {
        TestClient { db, config }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(self.config.clone()))
            .configure(hackathon_teams::routes::configure_routes)
    }

    async fn create_with_role(&self, username: &str, role: Role) -> (Uuid, String) {
        let secret = new_secret();
        let hashed = encrypt(&secret).expect("Failed to encrypt token");

        let user_id = self.db.create_user(DBUserCreate {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            token: hashed,
            role,
            skills: String::new(),
            about: String::new(),
        }).await.expect("Failed to create user");

        (user_id, construct_token(&user_id, &secret))
    }

    /// A participant with a working bearer token.
    pub async fn create_test_user(&self, username: &str) -> (Uuid, String) {
        self.create_with_role(username, Role::Participant).await
    }

    pub async fn create_test_admin(&self, username: &str) -> (Uuid, String) {
        self.create_with_role(username, Role::Admin).await
    }

    /// A user for store-level tests that never authenticate over HTTP.
    pub async fn create_plain_user(&self, username: &str) -> Uuid {
        self.db.create_user(DBUserCreate {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            token: "unused".to_string(),
            role: Role::Participant,
            skills: String::new(),
            about: String::new(),
        }).await.expect("Failed to create user")
    }

    pub async fn create_team_with_leader(&self, leader: Uuid, name: &str, max_members: i32) -> i32 {
        self.db.create_team(leader, NewTeam {
            name: name.to_string(),
            description: String::new(),
            max_members: Some(max_members),
        })
        .await
        .expect("Failed to create team")
        .id
    }

    /// Join request plus leader acceptance, for setting up full teams.
    pub async fn add_member(&self, leader: Uuid, team_id: i32, user: Uuid) {
        let inv = self.db.join_team(user, team_id).await.expect("join failed").into_inner();
        self.db.accept_invitation(leader, inv.id).await.expect("accept failed");
    }
}
