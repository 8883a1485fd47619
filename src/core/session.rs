//! Acting role, login and client-side permission gating.
//!
//! The acting role is picked at login from a fixed set of demo accounts and
//! has no relation to the directory [`User`](super::models::User) records
//! fetched from the server. Gating here only decides whether the console
//! issues a call; the server enforces nothing.

use std::fmt;

use chrono::{DateTime, Utc};

/// Role the operator is acting as for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Developer,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Developer, Role::Viewer];

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Developer => "Developer",
            Role::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutating action subject to gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Create,
    Update,
    Delete,
}

impl Permission {
    pub const ALL: [Permission; 3] = [Permission::Create, Permission::Update, Permission::Delete];

    pub fn label(self) -> &'static str {
        match self {
            Permission::Create => "create",
            Permission::Update => "update",
            Permission::Delete => "delete",
        }
    }

    /// Notice shown when the acting role may not perform this action.
    pub fn denial_notice(self) -> &'static str {
        match self {
            Permission::Create => "Create requires Admin or Developer access.",
            Permission::Update => "Update requires Admin or Developer access.",
            Permission::Delete => "Delete requires Admin access.",
        }
    }

    /// Notice shown when the server call for this action fails.
    pub fn failure_notice(self) -> &'static str {
        match self {
            Permission::Create => "Failed to create resource. Check backend logs.",
            Permission::Update => "Failed to update resource.",
            Permission::Delete => "Failed to delete resource. Check backend logs.",
        }
    }
}

/// Admin: everything. Developer: create and update. Viewer: nothing.
pub const fn can_perform(role: Role, permission: Permission) -> bool {
    match role {
        Role::Admin => true,
        Role::Developer => matches!(permission, Permission::Create | Permission::Update),
        Role::Viewer => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAccount {
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
}

pub const DEMO_ACCOUNTS: [DemoAccount; 3] = [
    DemoAccount {
        email: "admin@example.com",
        password: "admin123",
        role: Role::Admin,
    },
    DemoAccount {
        email: "dev@example.com",
        password: "dev123",
        role: Role::Developer,
    },
    DemoAccount {
        email: "viewer@example.com",
        password: "viewer123",
        role: Role::Viewer,
    },
];

/// Role for an exact email/password match against the demo accounts.
pub fn authenticate(email: &str, password: &str) -> Option<Role> {
    DEMO_ACCOUNTS
        .iter()
        .find(|account| account.email == email && account.password == password)
        .map(|account| account.role)
}

/// Help text listing the accepted accounts, shown on a failed login.
pub fn demo_accounts_hint() -> String {
    let mut hint = String::from("Invalid credentials. Use one of:");
    for account in DEMO_ACCOUNTS {
        hint.push_str(&format!(
            "\n  {:<10} {} / {}",
            format!("{}:", account.role),
            account.email,
            account.password
        ));
    }
    hint
}

/// Login state. The role is fixed until logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated {
        role: Role,
        since: DateTime<Utc>,
    },
}

impl Session {
    pub fn role(&self) -> Option<Role> {
        match self {
            Session::Authenticated { role, .. } => Some(*role),
            Session::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }
}

/// Display identity derived from the acting role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingIdentity {
    pub name: &'static str,
    pub email: &'static str,
    pub role: Role,
}

impl ActingIdentity {
    pub const fn for_role(role: Role) -> Self {
        let (name, email) = match role {
            Role::Admin => ("Cloud Admin", "admin@example.com"),
            Role::Developer => ("Cloud Developer", "dev@example.com"),
            Role::Viewer => ("Cloud Viewer", "viewer@example.com"),
        };
        Self { name, email, role }
    }

    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}
