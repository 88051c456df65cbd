//! Data Transfer Objects

use serde::Serialize;

use crate::domain::style::StyleDna;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// 共享 DTOs
// ============================================================================

/// 风格分析结果
#[derive(Debug, Serialize)]
pub struct StyleDnaResponse {
    pub style_dna: StyleDna,
    pub description: String,
}
