//! Authenticated principal model.

use std::fmt;

/// An authenticated principal with its roles and the authorities they grant.
///
/// # Example
/// ```
/// use gateway_admin_core::http::security::User;
///
/// let user = User::new("admin")
///     .roles(&["SYSTEM_ADMINISTRATOR".into()])
///     .authorities(&["CREATE_API_KEY".into(), "VIEW_API_KEYS".into()]);
///
/// assert!(user.has_role("SYSTEM_ADMINISTRATOR"));
/// assert!(user.has_authority("VIEW_API_KEYS"));
/// ```
#[derive(Clone, Debug)]
pub struct User {
    username: String,
    roles: Vec<String>,
    authorities: Vec<String>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        User {
            username: username.into(),
            roles: Vec::new(),
            authorities: Vec::new(),
        }
    }

    /// Returns the username.
    pub fn get_username(&self) -> &str {
        &self.username
    }

    /// Returns the user's roles.
    pub fn get_roles(&self) -> &[String] {
        &self.roles
    }

    /// Returns the user's authorities.
    pub fn get_authorities(&self) -> &[String] {
        &self.authorities
    }

    /// Adds roles to the user, skipping duplicates.
    pub fn roles(mut self, roles: &[String]) -> Self {
        for role in roles {
            if !self.roles.contains(role) {
                self.roles.push(role.clone());
            }
        }
        self
    }

    /// Adds authorities to the user, skipping duplicates.
    pub fn authorities(mut self, authorities: &[String]) -> Self {
        for authority in authorities {
            if !self.authorities.contains(authority) {
                self.authorities.push(authority.clone());
            }
        }
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User {{ username: {}, roles: {:?}, authorities: {:?} }}",
            self.username, self.roles, self.authorities
        )
    }
}
