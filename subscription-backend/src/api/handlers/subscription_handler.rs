// src/api/handlers/subscription_handler.rs
use crate::api::dto::common::PaginationQuery;
use crate::api::dto::subscription_dto::{
    CreateSubscriptionDto, SubscriptionDto, SubscriptionListResponse, TotalCostRequest,
    TotalCostResponse, UpdateSubscriptionDto,
};
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use axum::{
    extract::{FromRequest, FromRequestParts, Json, Path, Query, Request, State},
    http::{request::Parts, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::de::DeserializeOwned;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

// カスタムUUID抽出器
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // パスパラメータを文字列として最初に抽出
        let Path(path_str) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                AppError::BadRequest("Invalid subscription ID format".to_string())
            })?;

        let uuid = Uuid::parse_str(&path_str).map_err(|_| {
            AppError::BadRequest("Invalid subscription ID format".to_string())
        })?;

        Ok(UuidPath(uuid))
    }
}

// カスタムJSON抽出器
// デシリアライズ失敗時に {"error": "Invalid request payload"} を返す
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|_| AppError::BadRequest("Invalid request payload".to_string()))?;

        Ok(AppJson(value))
    }
}

// --- CRUD Handlers ---

pub async fn create_subscription_handler(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateSubscriptionDto>,
) -> AppResult<impl IntoResponse> {
    // 必須フィールドのチェック（順序は固定）
    if payload.service_name.is_empty() {
        return Err(AppError::BadRequest("ServiceName is required".to_string()));
    }
    if payload.price <= 0 {
        return Err(AppError::BadRequest("Price must be positive".to_string()));
    }
    if payload.user_id.is_empty() {
        return Err(AppError::BadRequest("UserID is required".to_string()));
    }
    if payload.start_date.is_empty() {
        return Err(AppError::BadRequest("StartDate is required".to_string()));
    }
    payload.validate()?;

    info!(
        service_name = %payload.service_name,
        user_id = %payload.user_id,
        "Creating new subscription"
    );

    let subscription = app_state.subscription_service.subscribe(payload).await?;

    info!(subscription_id = %subscription.id, "Subscription created successfully");

    Ok((StatusCode::CREATED, Json(subscription)))
}

pub async fn get_subscription_handler(
    State(app_state): State<AppState>,
    UuidPath(id): UuidPath,
) -> AppResult<Json<SubscriptionDto>> {
    info!(subscription_id = %id, "Getting subscription");

    let subscription = app_state.subscription_service.get_subscription(id).await?;

    Ok(Json(subscription))
}

pub async fn list_subscriptions_handler(
    State(app_state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<SubscriptionListResponse>> {
    let (page, page_size) = query.get_pagination();

    info!(page = page, page_size = page_size, "Listing subscriptions");

    let response = app_state
        .subscription_service
        .list_subscriptions(page, page_size)
        .await?;

    Ok(Json(response))
}

pub async fn update_subscription_handler(
    State(app_state): State<AppState>,
    UuidPath(id): UuidPath,
    AppJson(payload): AppJson<UpdateSubscriptionDto>,
) -> AppResult<Json<SubscriptionDto>> {
    if payload.is_empty() {
        return Err(AppError::BadRequest(
            "At least one field must be provided".to_string(),
        ));
    }
    payload.validate()?;

    info!(subscription_id = %id, "Updating subscription");

    let subscription = app_state
        .subscription_service
        .update_subscription(id, payload)
        .await?;

    info!(subscription_id = %id, "Subscription updated successfully");

    Ok(Json(subscription))
}

pub async fn delete_subscription_handler(
    State(app_state): State<AppState>,
    UuidPath(id): UuidPath,
) -> AppResult<StatusCode> {
    info!(subscription_id = %id, "Deleting subscription");

    app_state.subscription_service.delete_subscription(id).await?;

    info!(subscription_id = %id, "Subscription deleted successfully");

    Ok(StatusCode::NO_CONTENT)
}

// --- 集計ハンドラー ---

/// クエリパラメータ（すべて任意として受け取り、必須チェックは自前で行う）
#[derive(Debug, serde::Deserialize)]
pub struct TotalCostQuery {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub async fn total_cost_handler(
    State(app_state): State<AppState>,
    Query(query): Query<TotalCostQuery>,
) -> AppResult<Json<TotalCostResponse>> {
    let (user_id, start_date, end_date) = match (
        query.user_id.filter(|v| !v.is_empty()),
        query.start_date.filter(|v| !v.is_empty()),
        query.end_date.filter(|v| !v.is_empty()),
    ) {
        (Some(user_id), Some(start_date), Some(end_date)) => (user_id, start_date, end_date),
        _ => {
            return Err(AppError::BadRequest(
                "user_id, start_date and end_date are required".to_string(),
            ));
        }
    };

    info!(
        user_id = %user_id,
        start_date = %start_date,
        end_date = %end_date,
        service_name = query.service_name.as_deref().unwrap_or(""),
        "Calculating total cost"
    );

    let response = app_state
        .subscription_service
        .calculate_total_cost(TotalCostRequest {
            user_id,
            service_name: query.service_name.filter(|v| !v.is_empty()),
            start_date,
            end_date,
        })
        .await?;

    info!(
        total_cost = response.total_cost,
        subscriptions_count = response.subscriptions_count,
        "Calculation result"
    );

    Ok(Json(response))
}

// ヘルスチェックエンドポイント
async fn health_check_handler() -> &'static str {
    "OK"
}

// --- Router Setup ---

pub fn subscription_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/subscriptions",
            get(list_subscriptions_handler).post(create_subscription_handler),
        )
        // 静的パスはパスパラメータより優先してマッチする
        .route("/api/subscriptions/total", get(total_cost_handler))
        .route(
            "/api/subscriptions/{id}",
            get(get_subscription_handler)
                .put(update_subscription_handler)
                .delete(delete_subscription_handler),
        )
        // ヘルスチェックエンドポイントを追加
        .route("/health", get(health_check_handler))
        .with_state(app_state)
}
