//! Roles and permissions
//!
//! There is no real authentication: a session simply picks a role. Admins
//! may do everything; regular users may browse the catalog and look at
//! their own profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, LibraryResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn permits(&self, action: Action) -> bool {
        match self {
            Role::Admin => true,
            Role::User => matches!(
                action,
                Action::ViewDashboard | Action::BrowseBooks | Action::ViewProfile
            ),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role '{}' (expected admin or user)", other)),
        }
    }
}

/// Operations that are subject to a role check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ViewDashboard,
    BrowseBooks,
    ViewProfile,
    ManageBooks,
    ViewStudents,
    ManageStudents,
    ViewLoans,
    IssueBook,
    ReturnBook,
    SendNotification,
    ExportData,
    ImportData,
}

impl Action {
    pub fn describe(&self) -> &'static str {
        match self {
            Action::ViewDashboard => "view the dashboard",
            Action::BrowseBooks => "browse books",
            Action::ViewProfile => "view the profile",
            Action::ManageBooks => "manage books",
            Action::ViewStudents => "view students",
            Action::ManageStudents => "manage students",
            Action::ViewLoans => "view loans",
            Action::IssueBook => "issue books",
            Action::ReturnBook => "return books",
            Action::SendNotification => "send notifications",
            Action::ExportData => "export data",
            Action::ImportData => "import data",
        }
    }
}

/// Fail with [`LibraryError::Forbidden`] unless `role` may perform `action`
pub fn authorize(role: Role, action: Action) -> LibraryResult<()> {
    if role.permits(action) {
        Ok(())
    } else {
        Err(LibraryError::Forbidden { role, action })
    }
}

/// Profile shown for the signed-in role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub join_date: Option<String>,
}

impl UserProfile {
    /// The built-in demo profile for a role
    pub fn demo(role: Role) -> Self {
        match role {
            Role::Admin => Self {
                name: "Administrator".to_string(),
                email: "admin@library.edu".to_string(),
                phone: "+91 98765 43210".to_string(),
                role,
                department: Some("Central Library".to_string()),
                bio: Some("Managing the digital archives and system operations.".to_string()),
                join_date: Some("Jan 10, 2024".to_string()),
            },
            Role::User => Self {
                name: "Library Member".to_string(),
                email: "user@library.edu".to_string(),
                phone: "+91 99887 76655".to_string(),
                role,
                department: Some("Computer Science".to_string()),
                bio: Some("Avid reader and researcher.".to_string()),
                join_date: Some("Feb 14, 2024".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_permits_everything() {
        assert!(Role::Admin.permits(Action::IssueBook));
        assert!(Role::Admin.permits(Action::ImportData));
        assert!(Role::Admin.permits(Action::BrowseBooks));
    }

    #[test]
    fn test_user_is_restricted() {
        assert!(Role::User.permits(Action::BrowseBooks));
        assert!(Role::User.permits(Action::ViewDashboard));
        assert!(!Role::User.permits(Action::ViewStudents));
        assert!(!Role::User.permits(Action::IssueBook));
        assert!(!Role::User.permits(Action::ExportData));
    }

    #[test]
    fn test_authorize_reports_forbidden() {
        let err = authorize(Role::User, Action::ReturnBook).unwrap_err();
        assert!(matches!(
            err,
            LibraryError::Forbidden {
                role: Role::User,
                action: Action::ReturnBook
            }
        ));
        assert!(err.to_string().contains("return books"));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn test_demo_profiles() {
        let admin = UserProfile::demo(Role::Admin);
        assert_eq!(admin.email, "admin@library.edu");
        assert_eq!(admin.role, Role::Admin);

        let user = UserProfile::demo(Role::User);
        assert_eq!(user.name, "Library Member");
        assert_eq!(user.department.as_deref(), Some("Computer Science"));
    }
}
