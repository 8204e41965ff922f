//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`logger`] - 日志初始化
//! - [`result`] - 统一 Result 类型
//! - [`time`] - 时间戳辅助函数
//! - [`validation`] - 输入校验辅助函数

pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

// Re-export commonly used items
pub use result::AppResult;
pub use shared::{ApiResponse, AppError, ErrorCategory, ErrorCode};
