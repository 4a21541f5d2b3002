//! Dashboard page header

use std::time::Duration;

use crate::session::UserProfile;

/// Pause between revealing the dashboard section and drawing its charts
pub const CHART_REVEAL_DELAY: Duration = Duration::from_millis(120);

/// Name and role shown in the dashboard header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBadge {
    pub name: String,
    pub role: String,
}

impl UserBadge {
    pub fn from_profile(user: Option<&UserProfile>) -> Self {
        let name = user
            .and_then(UserProfile::greeting_name)
            .unwrap_or("User")
            .to_string();

        let role = user
            .and_then(|u| u.role.as_deref())
            .filter(|r| !r.is_empty())
            .unwrap_or("viewer");

        Self {
            name,
            role: capitalise(role),
        }
    }
}

/// Upper-case the first character
pub fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_defaults() {
        let badge = UserBadge::from_profile(None);
        assert_eq!(badge.name, "User");
        assert_eq!(badge.role, "Viewer");
    }

    #[test]
    fn test_badge_from_profile() {
        let user = UserProfile {
            email: Some("ops@bizanalytics.com".to_string()),
            role: Some("admin".to_string()),
            ..Default::default()
        };
        let badge = UserBadge::from_profile(Some(&user));
        assert_eq!(badge.name, "ops@bizanalytics.com");
        assert_eq!(badge.role, "Admin");
    }

    #[test]
    fn test_capitalise() {
        assert_eq!(capitalise("analyst"), "Analyst");
        assert_eq!(capitalise(""), "");
        assert_eq!(capitalise("écru"), "Écru");
    }
}
