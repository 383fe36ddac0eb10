// tests/common/test_data.rs
use serde_json::{json, Value};
use subscription_backend::api::dto::subscription_dto::CreateSubscriptionDto;
use uuid::Uuid;

/// POST /api/subscriptions 用のJSONペイロード
pub fn create_subscription_payload(user_id: Uuid, service_name: &str) -> Value {
    json!({
        "service_name": service_name,
        "price": 400,
        "user_id": user_id.to_string(),
        "start_date": "07-2025",
    })
}

/// サービス層テスト用のDTOビルダー
pub fn create_subscription_dto(
    user_id: Uuid,
    service_name: &str,
    price: i32,
    start_date: &str,
    end_date: Option<&str>,
) -> CreateSubscriptionDto {
    CreateSubscriptionDto {
        service_name: service_name.to_string(),
        price,
        user_id: user_id.to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.map(String::from),
    }
}
