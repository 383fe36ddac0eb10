use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // user_id カラムにインデックスを追加（ユーザー別の集計用）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_user_id")
                    .col(Subscriptions::UserId)
                    .to_owned(),
            )
            .await?;

        // 同一ユーザー・同一サービスの重複登録を防止する一意インデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_user_id_service_name")
                    .col(Subscriptions::UserId)
                    .col(Subscriptions::ServiceName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // start_date / end_date カラムにインデックスを追加（期間集計用）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_start_date")
                    .col(Subscriptions::StartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_end_date")
                    .col(Subscriptions::EndDate)
                    .to_owned(),
            )
            .await?;

        // created_at カラムにインデックスを追加（一覧の並び順用）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_created_at")
                    .col(Subscriptions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_created_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_end_date")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_start_date")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_user_id_service_name")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_user_id")
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

/// Reference to the subscriptions table
#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    ServiceName,
    UserId,
    StartDate,
    EndDate,
    CreatedAt,
}
