use serde::Deserialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub enum UserType {
    Bot,
    Organization,
    User,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserType::Bot => "Bot",
            UserType::Organization => "Organization",
            UserType::User => "User",
            UserType::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// The account summary Github returns in user listings such as an
/// organization's outside collaborators.
#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub login: String,
    pub id: u64,
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub site_admin: bool,
    pub html_url: Option<String>,
}
