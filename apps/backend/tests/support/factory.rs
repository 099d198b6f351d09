use backend::repos::clientes::ClienteFields;
use backend::repos::documentos::DocumentoFields;
use backend::repos::usuarios::Usuario;
use backend::services::usuarios::{register, RegisterUsuario};
use backend::state::app_state::AppState;
use backend_test_support::unique_helpers::{unique_email, unique_login};
use serde_json::json;
use time::macros::date;

pub const TEST_PASSWORD: &str = "s3nha-de-teste";

/// Register an active account with [`TEST_PASSWORD`]. `perfil` is `"A"` or `"U"`.
pub async fn create_usuario(state: &AppState, perfil: &str) -> Usuario {
    let db = state.db().expect("test state has a database");
    register(
        db,
        RegisterUsuario {
            nome: "Pessoa de Teste".to_string(),
            login: unique_login(if perfil == "A" { "admin" } else { "user" }),
            senha: TEST_PASSWORD.to_string(),
            perfil: Some(perfil.to_string()),
        },
    )
    .await
    .expect("register test usuario")
}

pub fn sample_cliente(nome: &str) -> ClienteFields {
    ClienteFields {
        nome_completo: nome.to_string(),
        email: unique_email("cliente"),
        estado_civil: "Solteiro".into(),
        profissao: "Professora".into(),
        cpf: "123.456.789-09".into(),
        rg: "1234567".into(),
        orgao_expedidor: "SSP".into(),
        nit: "1234567890".into(),
        numero_beneficio: "987654321".into(),
        data_nascimento: date!(1980 - 02 - 29),
        nome_mae: "Maria".into(),
        nome_pai: "José".into(),
        endereco: "Rua das Flores, 10".into(),
        bairro: "Centro".into(),
        cidade: "Recife".into(),
        uf: "PE".into(),
    }
}

pub fn sample_documento(titulo: &str) -> DocumentoFields {
    DocumentoFields {
        tipo_documento: "Procuração".into(),
        titulo: titulo.to_string(),
        tom_texto: "Formal".into(),
        conteudo: "Pelo presente instrumento...".into(),
        status: "Rascunho".into(),
        data_creacao: date!(2024 - 03 - 01),
        data_ultima_edicao: date!(2024 - 03 - 02),
        gerado_por_ia: false,
        dados_formulario: match json!({"cidade": "Recife"}) {
            serde_json::Value::Object(m) => Some(m),
            _ => None,
        },
        imagem_url: None,
    }
}
