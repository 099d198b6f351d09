//! Route-side entry points into [`AccessPolicy`]; every resource handler
//! goes through one of these.

use uuid::Uuid;

use crate::auth::policy::{AccessPolicy, Decision, OperationKind, Principal};
use crate::error::AppError;
use crate::logging::security;

/// Account management is reserved to the administrative profile.
pub fn require_account_manager(principal: &Principal) -> Result<(), AppError> {
    check(principal, OperationKind::ManageAccounts, None)
}

/// Call only after the record has been loaded, so a missing record reports
/// 404 rather than 403.
pub fn require_record_access(principal: &Principal, owner: Uuid) -> Result<(), AppError> {
    check(principal, OperationKind::AccessRecord, Some(owner))
}

fn check(
    principal: &Principal,
    operation: OperationKind,
    owner: Option<Uuid>,
) -> Result<(), AppError> {
    let decision = AccessPolicy.authorize(principal, operation, owner);
    if let Decision::Forbidden(reason) = decision {
        security::access_denied(&principal.login, &format!("{reason:?}"));
    }
    decision.into_result().map_err(AppError::from)
}
