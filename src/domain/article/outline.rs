//! 文章大纲
//!
//! 模型返回的大纲是自由文本，解析失败时降级为基于主题的 5 点固定大纲

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 大纲中的一个段落规划
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlinePoint {
    #[serde(default)]
    pub index: u32,
    /// 段落要点
    pub point: String,
    /// 与上一段的衔接方式
    #[serde(default)]
    pub connection: String,
}

impl OutlinePoint {
    pub fn new(index: u32, point: impl Into<String>, connection: impl Into<String>) -> Self {
        Self {
            index,
            point: point.into(),
            connection: connection.into(),
        }
    }
}

/// 大纲解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineParse {
    /// 从模型响应中解析得到
    Parsed(Vec<OutlinePoint>),
    /// 解析失败，使用固定大纲
    Fallback {
        points: Vec<OutlinePoint>,
        reason: String,
    },
}

impl OutlineParse {
    pub fn points(&self) -> &[OutlinePoint] {
        match self {
            OutlineParse::Parsed(points) => points,
            OutlineParse::Fallback { points, .. } => points,
        }
    }

    pub fn into_points(self) -> Vec<OutlinePoint> {
        match self {
            OutlineParse::Parsed(points) => points,
            OutlineParse::Fallback { points, .. } => points,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, OutlineParse::Fallback { .. })
    }
}

/// 基于主题的固定大纲
pub fn fallback_outline(topic: &str) -> Vec<OutlinePoint> {
    vec![
        OutlinePoint::new(1, format!("Introduction about {}", topic), "Start"),
        OutlinePoint::new(2, format!("First key aspect of {}", topic), "Continue"),
        OutlinePoint::new(3, format!("Second key aspect of {}", topic), "Continue"),
        OutlinePoint::new(4, format!("Third key aspect of {}", topic), "Continue"),
        OutlinePoint::new(5, format!("Conclusion about {}", topic), "Wrap up"),
    ]
}

/// 截取第一个 `[` 到最后一个 `]` 之间（含）的子串
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// 从 JSON 元素中取出一个大纲要点
///
/// 只要求 `point` 是字符串；`index` 接受数字或数字字符串，缺失时使用位置序号；
/// `connection` 缺失或为 null 时为空
fn point_from_value(value: &Value, position: usize) -> Option<OutlinePoint> {
    let point = value.get("point")?.as_str()?;

    let fallback_index = u32::try_from(position + 1).unwrap_or(u32::MAX);
    let index = match value.get("index") {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
    .unwrap_or(fallback_index);

    let connection = value
        .get("connection")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Some(OutlinePoint::new(index, point, connection))
}

/// 解析模型返回的大纲
///
/// 永不失败：找不到 JSON 数组、JSON 无效、数组为空或存在没有 `point` 的元素时
/// 返回 `OutlineParse::Fallback`
pub fn parse_outline(response: &str, topic: &str) -> OutlineParse {
    let fallback = |reason: String| OutlineParse::Fallback {
        points: fallback_outline(topic),
        reason,
    };

    let Some(json) = extract_json_array(response.trim()) else {
        return fallback("No JSON array found in response".to_string());
    };

    let items = match serde_json::from_str::<Vec<Value>>(json) {
        Ok(items) => items,
        Err(e) => return fallback(format!("Invalid outline JSON: {}", e)),
    };
    if items.is_empty() {
        return fallback("Outline array is empty".to_string());
    }

    let points: Option<Vec<OutlinePoint>> = items
        .iter()
        .enumerate()
        .map(|(position, item)| point_from_value(item, position))
        .collect();

    match points {
        Some(points) => OutlineParse::Parsed(points),
        None => fallback("Outline item without a string \"point\"".to_string()),
    }
}
