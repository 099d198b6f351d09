mod common;

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use backend::auth::policy::{AccountStatus, ListScope, OperationKind, Role};
use backend::auth::{
    authenticate, AccessPolicy, AccountLookup, AuthError, Claims, Decision, ForbiddenReason,
    SessionClaims, TokenService,
};
use backend::errors::domain::{DomainError, InfraErrorKind};
use backend::repos::usuarios::Usuario;
use backend::state::security_config::SecurityConfig;
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;

const T0: u64 = 1_700_000_000;

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

fn usuario(login: &str, role: Role, status: AccountStatus) -> Usuario {
    Usuario {
        id: Uuid::new_v4(),
        nome: format!("Conta {login}"),
        login: login.to_string(),
        senha_hash: String::new(),
        role,
        status,
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

#[derive(Default)]
struct InMemoryAccounts {
    by_login: HashMap<String, Usuario>,
    fail: bool,
}

impl InMemoryAccounts {
    fn with(accounts: &[&Usuario]) -> Self {
        Self {
            by_login: accounts
                .iter()
                .map(|u| (u.login.clone(), (*u).clone()))
                .collect(),
            fail: false,
        }
    }
}

#[async_trait]
impl AccountLookup for InMemoryAccounts {
    async fn resolve_account_by_login(&self, login: &str) -> Result<Option<Usuario>, DomainError> {
        if self.fail {
            return Err(DomainError::infra(InfraErrorKind::DbUnavailable, "down"));
        }
        Ok(self.by_login.get(login).cloned())
    }

    async fn resolve_account_by_id(&self, id: Uuid) -> Result<Option<Usuario>, DomainError> {
        if self.fail {
            return Err(DomainError::infra(InfraErrorKind::DbUnavailable, "down"));
        }
        Ok(self.by_login.values().find(|u| u.id == id).cloned())
    }
}

fn tokens() -> TokenService {
    TokenService::new(&SecurityConfig::new(b"authn-secret".to_vec()))
}

fn session_token(svc: &TokenService, u: &Usuario, ttl: u64, issued: u64) -> String {
    let claims = SessionClaims {
        sub: u.id.to_string(),
        login: u.login.clone(),
        perfil: u.role.code().to_string(),
    };
    svc.create_at(&claims.into_claims(), Some(ttl), at(issued))
}

#[tokio::test]
async fn valid_token_resolves_principal_with_stored_role() {
    let svc = tokens();
    let alice = usuario("alice", Role::Admin, AccountStatus::Active);
    let lookup = InMemoryAccounts::with(&[&alice]);
    let token = session_token(&svc, &alice, 100, T0);

    let principal = authenticate(&svc, &lookup, Some(&token), at(T0 + 50))
        .await
        .unwrap();

    assert_eq!(principal.id, alice.id);
    assert_eq!(principal.login, "alice");
    assert_eq!(principal.role, Role::Admin);
}

#[tokio::test]
async fn role_comes_from_account_not_token() {
    let svc = tokens();
    let bob = usuario("bob", Role::User, AccountStatus::Active);
    let lookup = InMemoryAccounts::with(&[&bob]);

    let mut claims = Claims::new();
    claims.insert("sub".into(), json!(bob.id.to_string()));
    claims.insert("login".into(), json!("bob"));
    claims.insert("perfil".into(), json!("A"));
    let token = svc.create_at(&claims, Some(100), at(T0));

    let principal = authenticate(&svc, &lookup, Some(&token), at(T0 + 1))
        .await
        .unwrap();
    assert_eq!(principal.role, Role::User);
}

#[tokio::test]
async fn missing_or_blank_bearer_is_missing_token() {
    let svc = tokens();
    let lookup = InMemoryAccounts::default();

    for bearer in [None, Some(""), Some("   ")] {
        let err = authenticate(&svc, &lookup, bearer, at(T0)).await.unwrap_err();
        assert_eq!(err, AuthError::MissingToken);
        assert!(err.is_unauthenticated());
    }
}

#[tokio::test]
async fn expired_token_is_unauthenticated_not_forbidden() {
    let svc = tokens();
    let alice = usuario("alice", Role::User, AccountStatus::Active);
    let lookup = InMemoryAccounts::with(&[&alice]);
    let token = session_token(&svc, &alice, 60, T0);

    let err = authenticate(&svc, &lookup, Some(&token), at(T0 + 61))
        .await
        .unwrap_err();

    assert_eq!(err, AuthError::InvalidToken);
    assert!(err.is_unauthenticated());
}

#[tokio::test]
async fn token_from_other_secret_is_invalid() {
    let alice = usuario("alice", Role::User, AccountStatus::Active);
    let lookup = InMemoryAccounts::with(&[&alice]);
    let foreign = TokenService::new(&SecurityConfig::new(b"someone-else".to_vec()));
    let token = session_token(&foreign, &alice, 100, T0);

    let err = authenticate(&tokens(), &lookup, Some(&token), at(T0 + 1))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::InvalidToken);
}

#[tokio::test]
async fn non_string_sub_is_invalid() {
    let svc = tokens();
    let lookup = InMemoryAccounts::default();
    let mut claims = Claims::new();
    claims.insert("sub".into(), json!(42));
    claims.insert("login".into(), json!("alice"));
    let token = svc.create_at(&claims, Some(100), at(T0));

    let err = authenticate(&svc, &lookup, Some(&token), at(T0 + 1))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::InvalidToken);
}

#[tokio::test]
async fn unknown_account_is_account_not_found() {
    let svc = tokens();
    let ghost = usuario("ghost", Role::User, AccountStatus::Active);
    let lookup = InMemoryAccounts::default();
    let token = session_token(&svc, &ghost, 100, T0);

    let err = authenticate(&svc, &lookup, Some(&token), at(T0 + 1))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::AccountNotFound);
}

#[tokio::test]
async fn falls_back_to_sub_when_login_claim_absent() {
    let svc = tokens();
    let carla = usuario("carla", Role::User, AccountStatus::Active);
    let lookup = InMemoryAccounts::with(&[&carla]);

    let mut claims = Claims::new();
    claims.insert("sub".into(), json!(carla.id.to_string()));
    claims.insert("perfil".into(), json!("U"));
    let token = svc.create_at(&claims, Some(100), at(T0));

    let principal = authenticate(&svc, &lookup, Some(&token), at(T0 + 1))
        .await
        .unwrap();
    assert_eq!(principal.id, carla.id);
}

#[tokio::test]
async fn falls_back_to_sub_when_login_was_renamed() {
    let svc = tokens();
    let mut carla = usuario("carla", Role::User, AccountStatus::Active);
    let token = session_token(&svc, &carla, 100, T0);
    carla.login = "carla.nova".into();
    let lookup = InMemoryAccounts::with(&[&carla]);

    let principal = authenticate(&svc, &lookup, Some(&token), at(T0 + 1))
        .await
        .unwrap();
    assert_eq!(principal.login, "carla.nova");
}

#[tokio::test]
async fn login_reused_by_newer_account_is_account_not_found() {
    let svc = tokens();
    let joao = usuario("joao", Role::User, AccountStatus::Active);
    let token = session_token(&svc, &joao, 86_400, T0);
    let successor = usuario("joao", Role::Admin, AccountStatus::Active);
    let lookup = InMemoryAccounts::with(&[&successor]);

    let err = authenticate(&svc, &lookup, Some(&token), at(T0 + 1))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::AccountNotFound);
}

#[tokio::test]
async fn login_held_by_other_account_resolves_token_subject() {
    let svc = tokens();
    let mut joao = usuario("joao", Role::User, AccountStatus::Active);
    let token = session_token(&svc, &joao, 100, T0);
    joao.login = "joao.antigo".into();
    let successor = usuario("joao", Role::Admin, AccountStatus::Active);
    let lookup = InMemoryAccounts::with(&[&joao, &successor]);

    let principal = authenticate(&svc, &lookup, Some(&token), at(T0 + 1))
        .await
        .unwrap();
    assert_eq!(principal.id, joao.id);
    assert_eq!(principal.role, Role::User);
}

#[tokio::test]
async fn inactive_account_is_account_not_found() {
    let svc = tokens();
    let dora = usuario("dora", Role::Admin, AccountStatus::Inactive);
    let lookup = InMemoryAccounts::with(&[&dora]);
    let token = session_token(&svc, &dora, 100, T0);

    let err = authenticate(&svc, &lookup, Some(&token), at(T0 + 1))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::AccountNotFound);
}

#[tokio::test]
async fn lookup_failure_reports_account_not_found() {
    let svc = tokens();
    let alice = usuario("alice", Role::User, AccountStatus::Active);
    let mut lookup = InMemoryAccounts::with(&[&alice]);
    lookup.fail = true;
    let token = session_token(&svc, &alice, 100, T0);

    let err = authenticate(&svc, &lookup, Some(&token), at(T0 + 1))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::AccountNotFound);
}

#[tokio::test]
async fn standard_user_on_foreign_document_is_forbidden() {
    let svc = tokens();
    let u1 = usuario("u1", Role::User, AccountStatus::Active);
    let u2 = usuario("u2", Role::User, AccountStatus::Active);
    let lookup = InMemoryAccounts::with(&[&u1, &u2]);
    let token = session_token(&svc, &u1, 100, T0);

    let principal = authenticate(&svc, &lookup, Some(&token), at(T0 + 1))
        .await
        .unwrap();

    assert_eq!(
        AccessPolicy.authorize(&principal, OperationKind::AccessRecord, Some(u2.id)),
        Decision::Forbidden(ForbiddenReason::NotOwner)
    );
    assert_eq!(
        AccessPolicy.authorize(&principal, OperationKind::AccessRecord, Some(u1.id)),
        Decision::Allow
    );
    assert_eq!(AccessPolicy.list_scope(&principal), ListScope::OwnedBy(u1.id));
}

#[tokio::test]
async fn elevated_user_on_foreign_document_is_allowed() {
    let svc = tokens();
    let admin = usuario("admin", Role::Admin, AccountStatus::Active);
    let u2 = usuario("u2", Role::User, AccountStatus::Active);
    let lookup = InMemoryAccounts::with(&[&admin, &u2]);
    let token = session_token(&svc, &admin, 100, T0);

    let principal = authenticate(&svc, &lookup, Some(&token), at(T0 + 1))
        .await
        .unwrap();

    assert_eq!(
        AccessPolicy.authorize(&principal, OperationKind::AccessRecord, Some(u2.id)),
        Decision::Allow
    );
    assert_eq!(
        AccessPolicy.authorize(&principal, OperationKind::ManageAccounts, None),
        Decision::Allow
    );
    assert_eq!(AccessPolicy.list_scope(&principal), ListScope::All);
}
