//! DTOs for clientes_sea adapter.

use serde::{Deserialize, Serialize};
use time::Date;

/// Editable client fields. Owner and id are managed by the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteFields {
    pub nome_completo: String,
    pub email: String,
    pub estado_civil: String,
    pub profissao: String,
    pub cpf: String,
    pub rg: String,
    pub orgao_expedidor: String,
    pub nit: String,
    pub numero_beneficio: String,
    pub data_nascimento: Date,
    pub nome_mae: String,
    pub nome_pai: String,
    pub endereco: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
}
