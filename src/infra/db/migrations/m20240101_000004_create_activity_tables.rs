//! Migration: Create rewards and user_history tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rewards::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rewards::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Rewards::UserId).uuid().not_null())
                    .col(ColumnDef::new(Rewards::Type).string().not_null())
                    .col(ColumnDef::new(Rewards::Value).integer().null())
                    .col(
                        ColumnDef::new(Rewards::AwardedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Rewards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rewards::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rewards_user_id")
                            .from(Rewards::Table, Rewards::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserHistory::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserHistory::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UserHistory::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserHistory::QuizId).uuid().not_null())
                    .col(ColumnDef::new(UserHistory::Score).integer().null())
                    .col(
                        ColumnDef::new(UserHistory::AttemptDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UserHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserHistory::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_history_user_id")
                            .from(UserHistory::Table, UserHistory::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_history_quiz_id")
                            .from(UserHistory::Table, UserHistory::QuizId)
                            .to(Quizzes::Table, Quizzes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserHistory::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Rewards::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Rewards {
    Table,
    Id,
    UserId,
    Type,
    Value,
    AwardedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum UserHistory {
    Table,
    Id,
    UserId,
    QuizId,
    Score,
    AttemptDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Quizzes {
    Table,
    Id,
}
