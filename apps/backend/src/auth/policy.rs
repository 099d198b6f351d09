//! Role and ownership rules applied by every resource route.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::authenticate::AuthError;

/// Account role. Parsed once at the storage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Elevated privilege (`A` / `ADMINISTRATIVO`)
    Admin,
    /// Standard user (`U` / `USUARIO`)
    User,
}

impl Role {
    /// Single-letter code stored in the database and carried in tokens.
    pub const fn code(self) -> &'static str {
        match self {
            Role::Admin => "A",
            Role::User => "U",
        }
    }

    pub const fn is_elevated(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" | "ADMINISTRATIVO" => Ok(Role::Admin),
            "U" | "USUARIO" => Ok(Role::User),
            other => Err(format!("unknown perfil: {other}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    pub const fn code(self) -> &'static str {
        match self {
            AccountStatus::Active => "A",
            AccountStatus::Inactive => "I",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" | "ATIVO" => Ok(AccountStatus::Active),
            "I" | "INATIVO" => Ok(AccountStatus::Inactive),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The authenticated caller. Role comes from the stored account, never
/// from the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub login: String,
    pub nome: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Create, list, read, update or delete accounts
    ManageAccounts,
    /// Read or mutate a client or document record
    AccessRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    InsufficientRole,
    NotOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Forbidden(ForbiddenReason),
}

impl Decision {
    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Forbidden(ForbiddenReason::InsufficientRole) => {
                Err(AuthError::InsufficientRole)
            }
            Decision::Forbidden(ForbiddenReason::NotOwner) => Err(AuthError::NotOwner),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    All,
    OwnedBy(Uuid),
}

/// Stateless rule set; one instance serves every route.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    pub fn authorize(
        &self,
        principal: &Principal,
        operation: OperationKind,
        target_owner: Option<Uuid>,
    ) -> Decision {
        if principal.role.is_elevated() {
            return Decision::Allow;
        }
        match operation {
            OperationKind::ManageAccounts => {
                Decision::Forbidden(ForbiddenReason::InsufficientRole)
            }
            OperationKind::AccessRecord => match target_owner {
                Some(owner) if owner == principal.id => Decision::Allow,
                // A standard user may always create; creation sets the owner.
                None => Decision::Allow,
                Some(_) => Decision::Forbidden(ForbiddenReason::NotOwner),
            },
        }
    }

    pub fn list_scope(&self, principal: &Principal) -> ListScope {
        if principal.role.is_elevated() {
            ListScope::All
        } else {
            ListScope::OwnedBy(principal.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            login: "alice".into(),
            nome: "Alice".into(),
            role,
        }
    }

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!("a".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("Administrativo".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("U".parse::<Role>().unwrap(), Role::User);
        assert_eq!(" usuario ".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn status_parsing() {
        assert_eq!("A".parse::<AccountStatus>().unwrap(), AccountStatus::Active);
        assert_eq!("ativo".parse::<AccountStatus>().unwrap(), AccountStatus::Active);
        assert_eq!("I".parse::<AccountStatus>().unwrap(), AccountStatus::Inactive);
        assert_eq!("INATIVO".parse::<AccountStatus>().unwrap(), AccountStatus::Inactive);
        assert!("X".parse::<AccountStatus>().is_err());
    }

    #[test]
    fn standard_user_cannot_manage_accounts() {
        let p = principal(Role::User);
        assert_eq!(
            AccessPolicy.authorize(&p, OperationKind::ManageAccounts, None),
            Decision::Forbidden(ForbiddenReason::InsufficientRole)
        );
    }

    #[test]
    fn admin_can_manage_accounts() {
        let p = principal(Role::Admin);
        assert_eq!(
            AccessPolicy.authorize(&p, OperationKind::ManageAccounts, Some(Uuid::new_v4())),
            Decision::Allow
        );
    }

    #[test]
    fn standard_user_on_foreign_record_is_not_owner() {
        let p = principal(Role::User);
        assert_eq!(
            AccessPolicy.authorize(&p, OperationKind::AccessRecord, Some(Uuid::new_v4())),
            Decision::Forbidden(ForbiddenReason::NotOwner)
        );
    }

    #[test]
    fn standard_user_on_own_record_is_allowed() {
        let p = principal(Role::User);
        assert_eq!(
            AccessPolicy.authorize(&p, OperationKind::AccessRecord, Some(p.id)),
            Decision::Allow
        );
    }

    #[test]
    fn admin_bypasses_ownership() {
        let p = principal(Role::Admin);
        assert_eq!(
            AccessPolicy.authorize(&p, OperationKind::AccessRecord, Some(Uuid::new_v4())),
            Decision::Allow
        );
    }

    #[test]
    fn list_scope_narrows_standard_users() {
        let user = principal(Role::User);
        let admin = principal(Role::Admin);
        assert_eq!(AccessPolicy.list_scope(&user), ListScope::OwnedBy(user.id));
        assert_eq!(AccessPolicy.list_scope(&admin), ListScope::All);
    }
}
