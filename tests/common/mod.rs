use std::sync::Arc;
use hackathon_teams::db::db_service::DbService;
use hackathon_teams::config::EnvConfig;

pub mod client;

#[allow(dead_code)]
pub const TEST_ADMIN_KEY: &str = "test_admin_key";

pub struct TestContext {
    pub db: Arc<DbService>,
    pub config: EnvConfig,
}

impl TestContext {
    /// Fresh in-memory database with migrations applied.
    pub async fn new() -> TestContext {
        let config = get_test_config();
        let db = Arc::new(
            DbService::new(&config.db_url)
                .await
                .expect("Failed to initialize DbService")
        );

        TestContext { db, config }
    }
}

pub fn get_test_config() -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: "sqlite::memory:".to_string(),
        admin_key: TEST_ADMIN_KEY.to_string(),
    }
}

// Test data helpers
#[allow(dead_code)]
pub mod test_data {
    use hackathon_teams::types::team::RTeamCreate;
    use hackathon_teams::types::user::RUserCreate;

    pub fn sample_user(username: &str) -> RUserCreate {
        RUserCreate {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role: Default::default(),
            skills: "Rust, SQL".to_string(),
            about: String::new(),
        }
    }

    pub fn sample_team(name: &str) -> RTeamCreate {
        RTeamCreate {
            name: name.to_string(),
            description: "We build things".to_string(),
            max_members: None,
        }
    }
}
