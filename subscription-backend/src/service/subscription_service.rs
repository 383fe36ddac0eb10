// src/service/subscription_service.rs

use crate::api::dto::common::PaginationMeta;
use crate::api::dto::subscription_dto::{
    CreateSubscriptionDto, SubscriptionDto, SubscriptionListResponse, TotalCostRequest,
    TotalCostResponse, UpdateSubscriptionDto,
};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::repository::subscription_repository::{
    NewSubscription, SubscriptionChanges, SubscriptionRepository,
};
use crate::utils::month::parse_month;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

pub struct SubscriptionService {
    repo: Arc<SubscriptionRepository>,
}

impl SubscriptionService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            repo: Arc::new(SubscriptionRepository::new(db_pool)),
        }
    }

    // --- CRUD ---

    pub async fn subscribe(&self, payload: CreateSubscriptionDto) -> AppResult<SubscriptionDto> {
        let user_id = parse_user_id(&payload.user_id)?;
        let start_date = parse_month(&payload.start_date).ok_or_else(|| {
            AppError::BadRequest("Invalid StartDate format (use MM-YYYY)".to_string())
        })?;
        let end_date = parse_optional_end_date(payload.end_date.as_deref())?;

        // 同一ユーザー・同一サービスの重複チェック
        if self.repo.exists_for_user(user_id, &payload.service_name).await? {
            return Err(AppError::Conflict("Subscription already exists".to_string()));
        }

        let created = match self
            .repo
            .create(NewSubscription {
                service_name: payload.service_name,
                price: payload.price,
                user_id,
                start_date,
                end_date,
            })
            .await
        {
            Ok(model) => model,
            // 一意インデックス違反（事前チェックと insert の間の競合）も 409 にする
            Err(err) if err.to_string().contains("duplicate key") => {
                return Err(AppError::Conflict("Subscription already exists".to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        Ok(created.into())
    }

    pub async fn get_subscription(&self, id: Uuid) -> AppResult<SubscriptionDto> {
        let subscription = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Subscription not found".to_string()))?;

        Ok(subscription.into())
    }

    pub async fn list_subscriptions(
        &self,
        page: u64,
        page_size: u64,
    ) -> AppResult<SubscriptionListResponse> {
        let (subscriptions, total) = self.repo.find_all_paginated(page, page_size).await?;

        Ok(SubscriptionListResponse {
            data: subscriptions.into_iter().map(SubscriptionDto::from).collect(),
            pagination: PaginationMeta::new(page, page_size, total),
        })
    }

    pub async fn update_subscription(
        &self,
        id: Uuid,
        payload: UpdateSubscriptionDto,
    ) -> AppResult<SubscriptionDto> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Subscription not found".to_string()))?;

        // end_date は常に置き換える: 省略時は解除
        let end_date = parse_optional_end_date(payload.end_date.as_deref())?;

        let updated = self
            .repo
            .update(
                existing,
                SubscriptionChanges {
                    service_name: payload.service_name,
                    price: payload.price,
                    end_date,
                },
            )
            .await?;

        Ok(updated.into())
    }

    pub async fn delete_subscription(&self, id: Uuid) -> AppResult<()> {
        let rows_affected = self.repo.delete_by_id(id).await?;

        if rows_affected == 0 {
            return Err(AppError::NotFound(
                "Subscription not found or already deleted".to_string(),
            ));
        }

        Ok(())
    }

    // --- 集計 ---

    pub async fn calculate_total_cost(
        &self,
        request: TotalCostRequest,
    ) -> AppResult<TotalCostResponse> {
        let user_id = parse_user_id(&request.user_id)?;

        let period_start = parse_month(&request.start_date).ok_or_else(|| {
            AppError::BadRequest("Invalid start_date format (use MM-YYYY)".to_string())
        })?;
        let period_end = parse_month(&request.end_date).ok_or_else(|| {
            AppError::BadRequest("Invalid end_date format (use MM-YYYY)".to_string())
        })?;

        if period_end < period_start {
            return Err(AppError::BadRequest(
                "end_date must not be before start_date".to_string(),
            ));
        }

        let (total_cost, subscriptions_count) = self
            .repo
            .calculate_total_cost(
                user_id,
                request.service_name.as_deref(),
                period_start,
                period_end,
            )
            .await?;

        Ok(TotalCostResponse {
            total_cost,
            subscriptions_count,
        })
    }
}

fn parse_user_id(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| AppError::BadRequest("Invalid user_id format".to_string()))
}

fn parse_optional_end_date(value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(raw) => parse_month(raw)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest("Invalid EndDate format (use MM-YYYY)".to_string())),
    }
}
