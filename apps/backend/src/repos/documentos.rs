//! Document repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::adapters::documentos_sea as documentos_adapter;
pub use crate::adapters::documentos_sea::DocumentoFields;
use crate::auth::policy::ListScope;
use crate::entities::documentos;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Documento {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub fields: DocumentoFields,
}

/// Stored form data that is not a JSON object reads back as `None`.
fn decode_form(id: Uuid, raw: Option<String>) -> Option<serde_json::Map<String, Value>> {
    let raw = raw?;
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => Some(map),
        _ => {
            warn!(documento_id = %id, "unreadable dados_formulario; returning null");
            None
        }
    }
}

impl From<documentos::Model> for Documento {
    fn from(m: documentos::Model) -> Self {
        let dados_formulario = decode_form(m.id, m.dados_formulario);
        Self {
            id: m.id,
            usuario_id: m.usuario_id,
            fields: DocumentoFields {
                tipo_documento: m.tipo_documento,
                titulo: m.titulo,
                tom_texto: m.tom_texto,
                conteudo: m.conteudo,
                status: m.status,
                data_creacao: m.data_creacao,
                data_ultima_edicao: m.data_ultima_edicao,
                gerado_por_ia: m.gerado_por_ia,
                dados_formulario,
                imagem_url: m.imagem_url,
            },
        }
    }
}

/// Required text must be non-blank and edits cannot predate creation.
pub fn normalize_and_validate(mut f: DocumentoFields) -> Result<DocumentoFields, DomainError> {
    let required: [(&str, &mut String); 5] = [
        ("tipoDocumento", &mut f.tipo_documento),
        ("titulo", &mut f.titulo),
        ("tomTexto", &mut f.tom_texto),
        ("conteudo", &mut f.conteudo),
        ("status", &mut f.status),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(DomainError::validation(format!("{name} must not be blank")));
        }
    }
    f.tipo_documento = f.tipo_documento.trim().to_string();
    f.titulo = f.titulo.trim().to_string();
    f.tom_texto = f.tom_texto.trim().to_string();
    f.status = f.status.trim().to_string();

    if f.data_ultima_edicao < f.data_creacao {
        return Err(DomainError::validation(
            "dataUltimaEdicao must not be before dataCreacao",
        ));
    }

    f.imagem_url = f
        .imagem_url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());

    Ok(f)
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    scope: ListScope,
) -> Result<Vec<Documento>, DomainError> {
    let owner = match scope {
        ListScope::All => None,
        ListScope::OwnedBy(id) => Some(id),
    };
    let rows = documentos_adapter::list(conn, owner).await?;
    Ok(rows.into_iter().map(Documento::from).collect())
}

pub async fn require_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Documento, DomainError> {
    documentos_adapter::find_by_id(conn, id)
        .await?
        .map(Documento::from)
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Documento, format!("Documento {id} not found"))
        })
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner: Uuid,
    fields: DocumentoFields,
) -> Result<Documento, DomainError> {
    let fields = normalize_and_validate(fields)?;
    let model = documentos_adapter::create(conn, owner, fields).await?;
    Ok(Documento::from(model))
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    fields: DocumentoFields,
) -> Result<Documento, DomainError> {
    let fields = normalize_and_validate(fields)?;
    let existing = documentos_adapter::find_by_id(conn, id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Documento, format!("Documento {id} not found"))
    })?;
    let model = documentos_adapter::update(conn, existing, fields).await?;
    Ok(Documento::from(model))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<(), DomainError> {
    let rows = documentos_adapter::delete(conn, id).await?;
    if rows == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Documento,
            format!("Documento {id} not found"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use super::*;

    fn sample() -> DocumentoFields {
        DocumentoFields {
            tipo_documento: "Procuração".into(),
            titulo: "Procuração Ad Judicia".into(),
            tom_texto: "Formal".into(),
            conteudo: "Conteúdo da procuração...".into(),
            status: "Rascunho".into(),
            data_creacao: date!(2024 - 01 - 20),
            data_ultima_edicao: date!(2024 - 01 - 20),
            gerado_por_ia: true,
            dados_formulario: None,
            imagem_url: None,
        }
    }

    #[test]
    fn wire_names_and_defaults() {
        let f: DocumentoFields = serde_json::from_value(json!({
            "tipoDocumento": "Petição Inicial",
            "titulo": "Petição",
            "tomTexto": "Técnico",
            "conteudo": "...",
            "status": "Finalizado",
            "dataCreacao": "2024-01-15",
            "dataUltimaEdicao": "2024-01-16"
        }))
        .unwrap();
        assert!(!f.gerado_por_ia);
        assert!(f.dados_formulario.is_none());
        assert!(f.imagem_url.is_none());

        let out = serde_json::to_value(sample()).unwrap();
        assert_eq!(out["geradoPorIA"], true);
        assert_eq!(out["dataCreacao"], "2024-01-20");
    }

    #[test]
    fn edit_before_creation_is_rejected() {
        let mut f = sample();
        f.data_ultima_edicao = date!(2024 - 01 - 19);
        assert!(matches!(
            normalize_and_validate(f),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut f = sample();
        f.titulo = " ".into();
        assert!(normalize_and_validate(f).is_err());
    }

    #[test]
    fn empty_image_url_becomes_none() {
        let mut f = sample();
        f.imagem_url = Some("  ".into());
        assert_eq!(normalize_and_validate(f).unwrap().imagem_url, None);
    }

    #[test]
    fn form_text_decoding() {
        let id = Uuid::new_v4();
        let map = decode_form(id, Some(r#"{"valorCausa":15000}"#.into())).unwrap();
        assert_eq!(map["valorCausa"], 15000);
        assert_eq!(decode_form(id, Some("not json".into())), None);
        assert_eq!(decode_form(id, Some("[1,2]".into())), None);
        assert_eq!(decode_form(id, None), None);
    }
}
