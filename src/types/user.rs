use entity::user::{Model as UserModel, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RUserCreate {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub about: String,
}

#[derive(Debug, Clone)]
pub struct DBUserCreate {
    pub username: String,
    pub email: String,
    pub token: String,
    pub role: Role,
    pub skills: String,
    pub about: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserCreateRes {
    pub id: Uuid,
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserRegenerateTokenRes {
    pub token: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub skills: Vec<String>,
    pub about: String,
    pub team_id: Option<i32>,
}

impl From<&UserModel> for UserProfile {
    fn from(u: &UserModel) -> Self {
        UserProfile {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
            role: u.role,
            skills: split_skills(&u.skills),
            about: u.about.clone(),
            team_id: u.team_id,
        }
    }
}

/// Skills are stored as one comma separated line.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_split_and_trim() {
        assert_eq!(split_skills("Rust, SQL ,, actix"), vec!["Rust", "SQL", "actix"]);
        assert!(split_skills("  ").is_empty());
    }
}
