// src/utils/month.rs
//! MM-YYYY 形式（月単位日付）のパースとフォーマット

use chrono::{Datelike, NaiveDate};

/// "MM-YYYY" 文字列を月初日の `NaiveDate` に変換する
///
/// 形式チェックは厳密に行う: 2桁の月 + ハイフン + 4桁の年のみ受け付ける
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    let (month, year) = value.split_once('-')?;
    if month.len() != 2 || year.len() != 4 {
        return None;
    }
    if !month.bytes().all(|b| b.is_ascii_digit()) || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;

    // 月の範囲チェックは from_ymd_opt に任せる
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// `NaiveDate` を "MM-YYYY" 文字列に変換する
pub fn format_month(date: NaiveDate) -> String {
    format!("{:02}-{:04}", date.month(), date.year())
}
