// src/api/dto/subscription_dto.rs
use crate::api::dto::common::PaginationMeta;
use crate::domain::subscription_model;
use crate::utils::month::format_month;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreateSubscriptionDto {
    #[validate(length(
        max = 100,
        message = "ServiceName must be 100 characters or less"
    ))]
    pub service_name: String,

    pub price: i32,

    // UUID かどうかはサービス層でパース時に検証する
    pub user_id: String,

    // MM-YYYY 形式
    pub start_date: String,
    pub end_date: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct UpdateSubscriptionDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "ServiceName must be between 1 and 100 characters"
    ))]
    pub service_name: Option<String>,

    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: Option<i32>,

    // MM-YYYY 形式。省略すると終了日は解除される（PUT の置き換えセマンティクス）
    pub end_date: Option<String>,
}

impl UpdateSubscriptionDto {
    pub fn is_empty(&self) -> bool {
        self.service_name.is_none() && self.price.is_none() && self.end_date.is_none()
    }
}

/// 期間集計のリクエスト（クエリパラメータ検証後）
#[derive(Debug, Clone)]
pub struct TotalCostRequest {
    pub user_id: String,
    pub service_name: Option<String>,
    pub start_date: String,
    pub end_date: String,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug)]
pub struct SubscriptionDto {
    pub id: Uuid,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    // MM-YYYY 形式
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// SeaORM の Model から SubscriptionDto への変換
impl From<subscription_model::Model> for SubscriptionDto {
    fn from(model: subscription_model::Model) -> Self {
        Self {
            id: model.id,
            service_name: model.service_name,
            price: model.price,
            user_id: model.user_id,
            start_date: format_month(model.start_date),
            end_date: model.end_date.map(format_month),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SubscriptionListResponse {
    pub data: Vec<SubscriptionDto>,
    pub pagination: PaginationMeta,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TotalCostResponse {
    pub total_cost: i64,
    pub subscriptions_count: i64,
}
