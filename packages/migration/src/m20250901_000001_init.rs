use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Usuarios {
    Table,
    Id,
    Nome,
    Login,
    SenhaHash,
    Perfil,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Clientes {
    Table,
    Id,
    UsuarioId,
    NomeCompleto,
    Email,
    EstadoCivil,
    Profissao,
    Cpf,
    Rg,
    OrgaoExpedidor,
    Nit,
    NumeroBeneficio,
    DataNascimento,
    NomeMae,
    NomePai,
    Endereco,
    Bairro,
    Cidade,
    Uf,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Documentos {
    Table,
    Id,
    UsuarioId,
    TipoDocumento,
    Titulo,
    TomTexto,
    Conteudo,
    Status,
    DataCreacao,
    DataUltimaEdicao,
    GeradoPorIa,
    DadosFormulario,
    ImagemUrl,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Usuarios::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Usuarios::Nome).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Usuarios::Login)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Usuarios::SenhaHash).string_len(255).not_null())
                    // Storage codes: 'A' (administrative) / 'U' (regular user)
                    .col(
                        ColumnDef::new(Usuarios::Perfil)
                            .string_len(30)
                            .not_null()
                            .default("U"),
                    )
                    // Storage codes: 'A' (active) / 'I' (inactive)
                    .col(
                        ColumnDef::new(Usuarios::Status)
                            .string_len(20)
                            .not_null()
                            .default("A"),
                    )
                    .col(
                        ColumnDef::new(Usuarios::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Usuarios::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Clientes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Clientes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Clientes::UsuarioId).uuid().not_null())
                    .col(ColumnDef::new(Clientes::NomeCompleto).string_len(255).not_null())
                    .col(ColumnDef::new(Clientes::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Clientes::EstadoCivil).string_len(50).not_null())
                    .col(ColumnDef::new(Clientes::Profissao).string_len(100).not_null())
                    .col(ColumnDef::new(Clientes::Cpf).string_len(20).not_null())
                    .col(ColumnDef::new(Clientes::Rg).string_len(50).not_null())
                    .col(ColumnDef::new(Clientes::OrgaoExpedidor).string_len(50).not_null())
                    .col(ColumnDef::new(Clientes::Nit).string_len(50).not_null())
                    .col(ColumnDef::new(Clientes::NumeroBeneficio).string_len(50).not_null())
                    .col(ColumnDef::new(Clientes::DataNascimento).date().not_null())
                    .col(ColumnDef::new(Clientes::NomeMae).string_len(255).not_null())
                    .col(ColumnDef::new(Clientes::NomePai).string_len(255).not_null())
                    .col(ColumnDef::new(Clientes::Endereco).text().not_null())
                    .col(ColumnDef::new(Clientes::Bairro).string_len(100).not_null())
                    .col(ColumnDef::new(Clientes::Cidade).string_len(100).not_null())
                    .col(ColumnDef::new(Clientes::Uf).string_len(2).not_null())
                    .col(
                        ColumnDef::new(Clientes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Clientes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clientes_usuario")
                            .from(Clientes::Table, Clientes::UsuarioId)
                            .to(Usuarios::Table, Usuarios::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_clientes_usuario_id")
                    .table(Clientes::Table)
                    .col(Clientes::UsuarioId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Documentos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Documentos::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Documentos::UsuarioId).uuid().not_null())
                    .col(ColumnDef::new(Documentos::TipoDocumento).string_len(100).not_null())
                    .col(ColumnDef::new(Documentos::Titulo).string_len(255).not_null())
                    .col(ColumnDef::new(Documentos::TomTexto).string_len(50).not_null())
                    .col(ColumnDef::new(Documentos::Conteudo).text().not_null())
                    .col(ColumnDef::new(Documentos::Status).string_len(50).not_null())
                    .col(ColumnDef::new(Documentos::DataCreacao).date().not_null())
                    .col(ColumnDef::new(Documentos::DataUltimaEdicao).date().not_null())
                    .col(
                        ColumnDef::new(Documentos::GeradoPorIa)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    // Serialized JSON object
                    .col(ColumnDef::new(Documentos::DadosFormulario).text().null())
                    .col(ColumnDef::new(Documentos::ImagemUrl).text().null())
                    .col(
                        ColumnDef::new(Documentos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Documentos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documentos_usuario")
                            .from(Documentos::Table, Documentos::UsuarioId)
                            .to(Usuarios::Table, Usuarios::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_documentos_usuario_id")
                    .table(Documentos::Table)
                    .col(Documentos::UsuarioId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Documentos::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clientes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Usuarios::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
