//! Client repository functions for the domain layer.

use std::sync::LazyLock;

use regex::Regex;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::adapters::clientes_sea as clientes_adapter;
pub use crate::adapters::clientes_sea::ClienteFields;
use crate::auth::policy::ListScope;
use crate::entities::clientes;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Cliente {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub fields: ClienteFields,
}

impl From<clientes::Model> for Cliente {
    fn from(m: clientes::Model) -> Self {
        Self {
            id: m.id,
            usuario_id: m.usuario_id,
            fields: ClienteFields {
                nome_completo: m.nome_completo,
                email: m.email,
                estado_civil: m.estado_civil,
                profissao: m.profissao,
                cpf: m.cpf,
                rg: m.rg,
                orgao_expedidor: m.orgao_expedidor,
                nit: m.nit,
                numero_beneficio: m.numero_beneficio,
                data_nascimento: m.data_nascimento,
                nome_mae: m.nome_mae,
                nome_pai: m.nome_pai,
                endereco: m.endereco,
                bairro: m.bairro,
                cidade: m.cidade,
                uf: m.uf,
            },
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap()
    });
    &EMAIL
}

/// Trim every text field and upper-case `uf`, then check the rules.
pub fn normalize_and_validate(mut f: ClienteFields) -> Result<ClienteFields, DomainError> {
    let required: [(&str, &mut String); 15] = [
        ("nomeCompleto", &mut f.nome_completo),
        ("email", &mut f.email),
        ("estadoCivil", &mut f.estado_civil),
        ("profissao", &mut f.profissao),
        ("cpf", &mut f.cpf),
        ("rg", &mut f.rg),
        ("orgaoExpedidor", &mut f.orgao_expedidor),
        ("nit", &mut f.nit),
        ("numeroBeneficio", &mut f.numero_beneficio),
        ("nomeMae", &mut f.nome_mae),
        ("nomePai", &mut f.nome_pai),
        ("endereco", &mut f.endereco),
        ("bairro", &mut f.bairro),
        ("cidade", &mut f.cidade),
        ("uf", &mut f.uf),
    ];
    for (name, value) in required {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(format!("{name} must not be blank")));
        }
        if trimmed.len() != value.len() {
            *value = trimmed.to_string();
        }
    }

    if !email_regex().is_match(&f.email) {
        return Err(DomainError::validation("email is not a valid address"));
    }

    f.uf = f.uf.to_ascii_uppercase();
    if f.uf.len() != 2 || !f.uf.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::validation("uf must be exactly two letters"));
    }

    Ok(f)
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    scope: ListScope,
) -> Result<Vec<Cliente>, DomainError> {
    let owner = match scope {
        ListScope::All => None,
        ListScope::OwnedBy(id) => Some(id),
    };
    let rows = clientes_adapter::list(conn, owner).await?;
    Ok(rows.into_iter().map(Cliente::from).collect())
}

pub async fn require_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Cliente, DomainError> {
    clientes_adapter::find_by_id(conn, id)
        .await?
        .map(Cliente::from)
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Cliente, format!("Cliente {id} not found"))
        })
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner: Uuid,
    fields: ClienteFields,
) -> Result<Cliente, DomainError> {
    let fields = normalize_and_validate(fields)?;
    let model = clientes_adapter::create(conn, owner, fields).await?;
    Ok(Cliente::from(model))
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    fields: ClienteFields,
) -> Result<Cliente, DomainError> {
    let fields = normalize_and_validate(fields)?;
    let existing = clientes_adapter::find_by_id(conn, id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Cliente, format!("Cliente {id} not found"))
    })?;
    let model = clientes_adapter::update(conn, existing, fields).await?;
    Ok(Cliente::from(model))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<(), DomainError> {
    let rows = clientes_adapter::delete(conn, id).await?;
    if rows == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Cliente,
            format!("Cliente {id} not found"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn sample() -> ClienteFields {
        ClienteFields {
            nome_completo: "João Silva".into(),
            email: "joao.silva@example.com".into(),
            estado_civil: "Solteiro".into(),
            profissao: "Advogado".into(),
            cpf: "12345678901".into(),
            rg: "1234567".into(),
            orgao_expedidor: "SSP".into(),
            nit: "1234567890".into(),
            numero_beneficio: "987654321".into(),
            data_nascimento: date!(1990 - 05 - 20),
            nome_mae: "Maria Silva".into(),
            nome_pai: "Carlos Silva".into(),
            endereco: "Rua A, 123".into(),
            bairro: "Centro".into(),
            cidade: "São Paulo".into(),
            uf: "SP".into(),
        }
    }

    #[test]
    fn valid_record_passes_and_is_trimmed() {
        let mut f = sample();
        f.nome_completo = "  João Silva ".into();
        f.uf = "sp".into();
        let out = normalize_and_validate(f).unwrap();
        assert_eq!(out.nome_completo, "João Silva");
        assert_eq!(out.uf, "SP");
    }

    #[test]
    fn blank_field_is_rejected() {
        let mut f = sample();
        f.cidade = "   ".into();
        match normalize_and_validate(f) {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("cidade")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn bad_email_is_rejected() {
        for email in ["joao", "joao@", "@example.com", "joao@example", "jo ao@example.com"] {
            let mut f = sample();
            f.email = email.into();
            assert!(normalize_and_validate(f).is_err(), "{email} accepted");
        }
    }

    #[test]
    fn uf_must_be_two_letters() {
        for uf in ["S", "SPP", "S1", "12"] {
            let mut f = sample();
            f.uf = uf.into();
            assert!(normalize_and_validate(f).is_err(), "{uf} accepted");
        }
    }

    #[test]
    fn camel_case_wire_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["nomeCompleto"], "João Silva");
        assert_eq!(json["dataNascimento"], "1990-05-20");
        assert_eq!(json["orgaoExpedidor"], "SSP");
    }
}
