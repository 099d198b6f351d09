//! Authentication and authorization core.
//!
//! `token` signs and verifies session tokens, `authenticate` turns a bearer
//! string into a [`Principal`], and `policy` decides what that principal may
//! do with a record.

pub mod authenticate;
pub mod claims;
pub mod password;
pub mod policy;
pub mod token;

pub use authenticate::{authenticate, AccountLookup, AuthError};
pub use claims::SessionClaims;
pub use policy::{
    AccessPolicy, AccountStatus, Decision, ForbiddenReason, ListScope, OperationKind, Principal,
    Role,
};
pub use token::{Claims, TokenService, TokenVerification};
