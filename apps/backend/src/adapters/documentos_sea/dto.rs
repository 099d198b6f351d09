//! DTOs for documentos_sea adapter.

use serde::{Deserialize, Serialize};
use time::Date;

/// Editable document fields. `dados_formulario` is stored as JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentoFields {
    pub tipo_documento: String,
    pub titulo: String,
    pub tom_texto: String,
    pub conteudo: String,
    pub status: String,
    pub data_creacao: Date,
    pub data_ultima_edicao: Date,
    #[serde(rename = "geradoPorIA", default)]
    pub gerado_por_ia: bool,
    #[serde(default)]
    pub dados_formulario: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub imagem_url: Option<String>,
}
