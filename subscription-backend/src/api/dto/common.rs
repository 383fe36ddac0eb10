// src/api/dto/common.rs

use serde::{Deserialize, Serialize};

/// ページネーションクエリパラメータ（?page=&pageSize=）
///
/// 不正な数値はエラーにせずデフォルト値に落とす
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

impl PaginationQuery {
    /// デフォルト値と上限を適用してページとページサイズを取得
    pub fn get_pagination(&self) -> (u64, u64) {
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.parse::<i64>().ok())
            .unwrap_or(1);
        let page = if page < 1 { 1 } else { page as u64 };

        let page_size = self
            .page_size
            .as_deref()
            .and_then(|p| p.parse::<i64>().ok())
            .unwrap_or(10);
        let page_size = if page_size < 1 {
            10
        } else {
            std::cmp::min(page_size as u64, 100)
        };

        (page, page_size)
    }
}

/// ページネーション情報
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        Self {
            total,
            page,
            page_size,
            total_pages: (total + page_size - 1) / page_size,
        }
    }
}
