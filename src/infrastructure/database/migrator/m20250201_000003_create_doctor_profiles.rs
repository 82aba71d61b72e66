//! Create doctor_profiles table migration

use sea_orm_migration::prelude::*;

use super::m20250201_000002_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DoctorProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DoctorProfiles::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DoctorProfiles::UserId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(DoctorProfiles::LicenseUrl)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DoctorProfiles::LicenseContentId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DoctorProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_doctor_profiles_user_id")
                            .from(DoctorProfiles::Table, DoctorProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            // Deleting a user must not strand its profile
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DoctorProfiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum DoctorProfiles {
    Table,
    Id,
    UserId,
    LicenseUrl,
    LicenseContentId,
    CreatedAt,
}
