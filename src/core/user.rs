use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a user
///
/// Seeded users carry numeric ids while users entered through the create form
/// get generated string ids, so both shapes are accepted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(u64),
    Text(String),
}

impl UserId {
    /// True when both ids are written the same, so `42` and `"42"` agree
    pub fn same_text(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(n), Self::Text(s)) | (Self::Text(s), Self::Number(n)) => {
                s.as_str() == n.to_string()
            },
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        value.parse::<u64>().map_or_else(|_| Self::Text(value.to_string()), Self::Number)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        value.parse::<u64>().map_or(Self::Text(value), Self::Number)
    }
}

/// A person who creates or is assigned tickets
///
/// Identity is the id; name and email may change. No format checks happen
/// here, the create/edit forms do that before a user reaches the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

/// Plain wire shape of a [`User`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    pub const fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn serialize(&self) -> UserRecord {
        UserRecord {
            user_id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn deserialize(record: UserRecord) -> Self {
        Self {
            id: record.user_id,
            name: record.name,
            email: record.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accessors() {
        let mut user = User::new(1, "John Doe", "john@example.com");
        user.set_name("John Q. Doe");
        user.set_email("jq@example.com");

        assert_eq!(user.id(), &UserId::Number(1));
        assert_eq!(user.name(), "John Q. Doe");
        assert_eq!(user.email(), "jq@example.com");
    }

    #[test]
    fn test_user_record_shape() {
        let user = User::new(7, "Jane Smith", "jane@example.com");
        let value = serde_json::to_value(user.serialize()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"user_id": 7, "name": "Jane Smith", "email": "jane@example.com"})
        );
    }

    #[test]
    fn test_user_id_accepts_strings_and_numbers() {
        let record: UserRecord =
            serde_json::from_str(r#"{"user_id": "user_1700000000000_1", "name": "A", "email": "a@b"}"#)
                .unwrap();
        assert_eq!(record.user_id, UserId::Text("user_1700000000000_1".to_string()));

        let record: UserRecord =
            serde_json::from_str(r#"{"user_id": 3, "name": "B", "email": "b@c"}"#).unwrap();
        let user = User::deserialize(record);
        assert_eq!(user.id().to_string(), "3");
    }

    #[test]
    fn test_same_text_ignores_wire_shape() {
        let number = UserId::Number(42);
        let text = UserId::Text("42".to_string());
        assert!(number.same_text(&text));
        assert!(text.same_text(&number));
        assert!(!number.same_text(&UserId::Text("042".to_string())));
        assert!(!text.same_text(&UserId::Number(7)));
        assert_ne!(number, text);
    }

    #[test]
    fn test_user_id_from_str_prefers_numbers() {
        assert_eq!(UserId::from("12"), UserId::Number(12));
        assert_eq!(UserId::from("bob"), UserId::Text("bob".to_string()));
    }
}
