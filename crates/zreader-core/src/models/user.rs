use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "userInfo")]
    pub user_info: UserInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    pub email: Option<String>,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: Option<String>,
    /// Wire value: 0 = male, 1 = female
    #[serde(default)]
    pub gender: u8,
    pub bio: Option<String>,
    /// Wire value: 0 = regular user, 1 = administrator
    #[serde(default)]
    pub role: u8,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Gender {
    pub fn from_wire(value: u8) -> Self {
        if value == 1 {
            Gender::Female
        } else {
            Gender::Male
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
        }
    }
}

impl UserInfo {
    pub fn gender(&self) -> Gender {
        Gender::from_wire(self.gender)
    }

    pub fn role(&self) -> Role {
        if self.role == 1 {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    /// Nickname if set, otherwise the username
    pub fn display_name(&self) -> &str {
        if self.nickname.trim().is_empty() {
            &self.username
        } else {
            &self.nickname
        }
    }
}

/// Partial profile update. Fields left as `None` are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "avatarUrl", skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl UpdateProfile {
    pub fn is_empty(&self) -> bool {
        self.nickname.is_none()
            && self.email.is_none()
            && self.avatar_url.is_none()
            && self.gender.is_none()
            && self.bio.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_info() {
        let json = r#"{"id": 7, "username": "alice", "nickname": "", "email": null, "avatarUrl": "https://cdn.example/a.png", "gender": 1, "bio": null, "role": 1, "createdAt": "2024-05-01 10:00:00"}"#;
        let user: UserInfo = serde_json::from_str(json).expect("Failed to parse user JSON");

        assert_eq!(user.id, 7);
        assert_eq!(user.avatar_url.as_deref(), Some("https://cdn.example/a.png"));
        assert_eq!(user.gender(), Gender::Female);
        assert!(user.is_admin());
        assert_eq!(user.display_name(), "alice");
    }

    #[test]
    fn test_update_profile_omits_unset_fields() {
        let update = UpdateProfile {
            nickname: Some("Al".to_string()),
            gender: Some(Gender::Male.to_wire()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).expect("serialize");

        assert_eq!(value, serde_json::json!({"nickname": "Al", "gender": 0}));
        assert!(!update.is_empty());
        assert!(UpdateProfile::default().is_empty());
    }
}
