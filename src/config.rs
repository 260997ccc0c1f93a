//! 解析器配置

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 默认最短地址长度（字符数）
pub const DEFAULT_MIN_LENGTH: usize = 6;

/// 解析器选项
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// 规范化之后的最短字符数，低于此长度直接判为过短
    pub min_length: usize,
    /// 地址开头可以去掉的国家名
    pub country_prefixes: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            country_prefixes: vec!["中国".to_string()],
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn country_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.country_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }
}
