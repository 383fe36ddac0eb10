// src/repository/subscription_repository.rs
use crate::domain::subscription_model::{self, Entity as SubscriptionEntity};
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, DbConn, DbErr};
use sea_orm::{Condition, FromQueryResult, Order, PaginatorTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

/// 新規登録する購読のフィールド（パース済み）
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// 更新対象フィールド
///
/// PUT の置き換えセマンティクスに合わせる:
/// service_name / price の None は「変更しない」、
/// end_date の None は「終了日を解除する」を意味する
#[derive(Debug, Clone, Default)]
pub struct SubscriptionChanges {
    pub service_name: Option<String>,
    pub price: Option<i32>,
    pub end_date: Option<NaiveDate>,
}

/// SUM / COUNT 集計結果の1行
#[derive(Debug, FromQueryResult)]
struct TotalCostRow {
    // マッチする行が無い場合 SUM は NULL になる
    total_cost: Option<i64>,
    subscriptions_count: i64,
}

pub struct SubscriptionRepository {
    db: DbConn,
}

impl SubscriptionRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new: NewSubscription,
    ) -> Result<subscription_model::Model, DbErr> {
        let mut active = subscription_model::ActiveModel::new();
        active.service_name = Set(new.service_name);
        active.price = Set(new.price);
        active.user_id = Set(new.user_id);
        active.start_date = Set(new.start_date);
        active.end_date = Set(new.end_date);

        active.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<subscription_model::Model>, DbErr> {
        SubscriptionEntity::find_by_id(id).one(&self.db).await
    }

    /// 同一ユーザー・同一サービスの購読が既に存在するか
    pub async fn exists_for_user(
        &self,
        user_id: Uuid,
        service_name: &str,
    ) -> Result<bool, DbErr> {
        let count = SubscriptionEntity::find()
            .filter(subscription_model::Column::UserId.eq(user_id))
            .filter(subscription_model::Column::ServiceName.eq(service_name))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// 作成日の降順でページネーション付きの一覧を取得
    pub async fn find_all_paginated(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<subscription_model::Model>, u64), DbErr> {
        // ページサイズを制限（過大なページサイズを防止）
        let page_size = std::cmp::min(page_size, 100);
        let offset = (page.max(1) - 1) * page_size;

        // 総件数を取得
        let total_items = SubscriptionEntity::find().count(&self.db).await?;

        let subscriptions = SubscriptionEntity::find()
            .order_by(subscription_model::Column::CreatedAt, Order::Desc)
            .limit(page_size)
            .offset(offset)
            .all(&self.db)
            .await?;

        Ok((subscriptions, total_items))
    }

    pub async fn update(
        &self,
        model: subscription_model::Model,
        changes: SubscriptionChanges,
    ) -> Result<subscription_model::Model, DbErr> {
        let mut active: subscription_model::ActiveModel = model.into();

        if let Some(service_name) = changes.service_name {
            active.service_name = Set(service_name);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        // end_date は常に置き換える（None = 解除）
        active.end_date = Set(changes.end_date);

        active.update(&self.db).await
    }

    /// 削除した行数を返す（0 = 見つからなかった）
    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = SubscriptionEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    /// 指定期間と重なる購読の SUM(price) / COUNT(*) を1クエリで集計する
    ///
    /// 重なり条件: start_date <= 期間末 AND (end_date IS NULL OR end_date >= 期間頭)
    pub async fn calculate_total_cost(
        &self,
        user_id: Uuid,
        service_name: Option<&str>,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<(i64, i64), DbErr> {
        let mut query = SubscriptionEntity::find()
            .select_only()
            .column_as(
                Expr::col(subscription_model::Column::Price).sum(),
                "total_cost",
            )
            .column_as(
                Expr::col(subscription_model::Column::Id).count(),
                "subscriptions_count",
            )
            .filter(subscription_model::Column::UserId.eq(user_id))
            .filter(subscription_model::Column::StartDate.lte(period_end))
            .filter(
                Condition::any()
                    .add(subscription_model::Column::EndDate.is_null())
                    .add(subscription_model::Column::EndDate.gte(period_start)),
            );

        if let Some(service_name) = service_name {
            query = query.filter(subscription_model::Column::ServiceName.eq(service_name));
        }

        let row = query
            .into_model::<TotalCostRow>()
            .one(&self.db)
            .await?
            // GROUP BY 無しの集計は常に1行返る
            .ok_or_else(|| DbErr::Custom("aggregate query returned no row".to_string()))?;

        Ok((row.total_cost.unwrap_or(0), row.subscriptions_count))
    }
}
