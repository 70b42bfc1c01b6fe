//! # PNG 头信息数据模型
//!
//! 有序的字段名 → 值映射，仅用于显示，不会持久化。
//!
//! ## 依赖关系
//! - 被 `codec/png.rs` 构造
//! - 被 `utils/output.rs` 打印

/// PNG 头信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderInfo {
    fields: Vec<(String, String)>,
}

impl HeaderInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加字段（保持插入顺序）
    pub fn push(&mut self, name: &str, value: impl ToString) {
        self.fields.push((name.to_string(), value.to_string()));
    }

    /// 按名称查找字段
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
