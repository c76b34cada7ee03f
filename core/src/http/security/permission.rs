//! Named permissions and the role to permission grant table.

use std::fmt;

use crate::http::security::api_key::Role;

/// Permission required by a management operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    CreateApiKey,
    UpdateApiKey,
    ViewApiKeys,
    RevokeApiKey,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::CreateApiKey,
        Permission::UpdateApiKey,
        Permission::ViewApiKeys,
        Permission::RevokeApiKey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::CreateApiKey => "CREATE_API_KEY",
            Permission::UpdateApiKey => "UPDATE_API_KEY",
            Permission::ViewApiKeys => "VIEW_API_KEYS",
            Permission::RevokeApiKey => "REVOKE_API_KEY",
        }
    }

    /// Permissions granted by a single role.
    pub fn granted_to(role: Role) -> &'static [Permission] {
        match role {
            Role::SystemAdministrator => &Permission::ALL,
            Role::SecurityOfficer => &[Permission::ViewApiKeys],
            Role::RegistrationOfficer | Role::ServiceAdministrator | Role::ServerObserver => &[],
        }
    }

    /// Union of the permissions granted by `roles`, as authority strings.
    pub fn authorities_for(roles: &[Role]) -> Vec<String> {
        let mut granted: Vec<Permission> = roles
            .iter()
            .flat_map(|role| Permission::granted_to(*role).iter().copied())
            .collect();
        granted.sort();
        granted.dedup();
        granted.iter().map(|p| p.as_str().to_string()).collect()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
