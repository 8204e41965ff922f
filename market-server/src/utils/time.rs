//! 时间工具函数
//!
//! 模型层所有时间戳统一为 RFC 3339 字符串 (UTC)，
//! 由本模块产生，repository 层原样存取。

use chrono::{SecondsFormat, Utc};

/// 当前 UTC 时间的 RFC 3339 字符串 (毫秒精度)
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
