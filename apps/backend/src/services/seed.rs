//! Demo data for local environments.

use sea_orm::ConnectionTrait;
use serde_json::json;
use time::macros::date;
use tracing::info;

use crate::adapters::{clientes_sea, documentos_sea};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::clientes::{self, ClienteFields};
use crate::repos::documentos::{self, DocumentoFields};
use crate::repos::usuarios;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub clientes_inserted: u64,
    pub documentos_inserted: u64,
    pub clientes_total: u64,
    pub documentos_total: u64,
}

fn demo_clientes() -> Vec<ClienteFields> {
    vec![
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
        },
        ClienteFields {
            nome_completo: "Ana Souza".into(),
            email: "ana.souza@example.com".into(),
            estado_civil: "Casado".into(),
            profissao: "Contadora".into(),
            cpf: "98765432100".into(),
            rg: "7654321".into(),
            orgao_expedidor: "SSP".into(),
            nit: "0987654321".into(),
            numero_beneficio: "123456789".into(),
            data_nascimento: date!(1985 - 08 - 15),
            nome_mae: "Paula Souza".into(),
            nome_pai: "Roberto Souza".into(),
            endereco: "Avenida B, 456".into(),
            bairro: "Jardins".into(),
            cidade: "São Paulo".into(),
            uf: "SP".into(),
        },
    ]
}

fn as_object(v: serde_json::Value) -> Option<serde_json::Map<String, serde_json::Value>> {
    match v {
        serde_json::Value::Object(m) => Some(m),
        _ => None,
    }
}

fn demo_documentos() -> Vec<DocumentoFields> {
    vec![
        DocumentoFields {
            tipo_documento: "Petição Inicial".into(),
            titulo: "Petição Inicial - Ação de Cobrança".into(),
            tom_texto: "Técnico".into(),
            conteudo: "Conteúdo da petição inicial...".into(),
            status: "Finalizado".into(),
            data_creacao: date!(2024 - 01 - 15),
            data_ultima_edicao: date!(2024 - 01 - 16),
            gerado_por_ia: true,
            dados_formulario: as_object(json!({
                "nomeCliente": "João Silva",
                "cpfCnpj": "123.456.789-01",
                "valorCausa": 15000
            })),
            imagem_url: None,
        },
        DocumentoFields {
            tipo_documento: "Procuração".into(),
            titulo: "Procuração Ad Judicia".into(),
            tom_texto: "Formal".into(),
            conteudo: "Conteúdo da procuração...".into(),
            status: "Rascunho".into(),
            data_creacao: date!(2024 - 01 - 20),
            data_ultima_edicao: date!(2024 - 01 - 20),
            gerado_por_ia: true,
            dados_formulario: as_object(json!({
                "nomeCliente": "Ana Souza",
                "oabAdvogado": "12345"
            })),
            imagem_url: None,
        },
    ]
}

/// Insert demo clients and documents owned by `owner_login`. Each table is
/// seeded only while it is empty, so reruns are no-ops.
pub async fn seed_demo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_login: &str,
) -> Result<SeedSummary, AppError> {
    let owner = usuarios::find_by_login(conn, owner_login.trim())
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Usuario,
                format!("owner login '{}' not found", owner_login.trim()),
            )
        })?;

    let mut summary = SeedSummary::default();

    if clientes_sea::count_all(conn).await? == 0 {
        for fields in demo_clientes() {
            clientes::create(conn, owner.id, fields).await?;
            summary.clientes_inserted += 1;
        }
    }
    if documentos_sea::count_all(conn).await? == 0 {
        for fields in demo_documentos() {
            documentos::create(conn, owner.id, fields).await?;
            summary.documentos_inserted += 1;
        }
    }

    summary.clientes_total = clientes_sea::count_all(conn).await?;
    summary.documentos_total = documentos_sea::count_all(conn).await?;
    info!(?summary, "demo seed finished");
    Ok(summary)
}
