//! 错误类型定义

use crate::division::Level;
use thiserror::Error;

/// 行政区划数据加载错误
///
/// 加载阶段的错误都是致命的：数据有问题时宁可拒绝构建解析器，也不要带着歧义数据提供服务。
#[derive(Debug, Error)]
pub enum LoadError {
    /// 同一级别下出现重复代码
    #[error("duplicate {level} code {code} with name {name} and {existing}")]
    DuplicateCode {
        level: Level,
        code: String,
        existing: String,
        name: String,
    },

    /// 缺少表头行
    #[error("missing header row in {level} data")]
    MissingHeader { level: Level },

    /// 数据行格式错误
    #[error("malformed {level} row at line {line}: {reason}")]
    MalformedRow {
        level: Level,
        line: u64,
        reason: String,
    },

    /// 上级区划不存在
    #[error("{level} {code} refers to unknown parent {parent}")]
    UnknownParent {
        level: Level,
        code: String,
        parent: String,
    },

    /// CSV 解析失败
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// 文件读取失败
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// 地址解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// 地址太短，无法拆出省市区
    #[error("address too short: {0}")]
    TooShort(String),

    /// 无效的地址（找不到省或市）
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// 未找到匹配的区划
    #[error("no {level} found for: {key}")]
    NotFound { level: Level, key: String },
}

impl ResolveError {
    pub(crate) fn not_found(level: Level, key: impl Into<String>) -> Self {
        Self::NotFound {
            level,
            key: key.into(),
        }
    }
}
