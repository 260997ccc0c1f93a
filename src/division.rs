//! 行政区划数据结构

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 区划级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    Province,
    City,
    Area,
}

impl Level {
    /// 该级别代码的位数
    pub fn code_len(self) -> usize {
        match self {
            Level::Province => 2,
            Level::City => 4,
            Level::Area => 6,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Province => "province",
            Level::City => "city",
            Level::Area => "area",
        };
        f.write_str(s)
    }
}

/// 省级区划（省、自治区、直辖市）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Province {
    /// 2 位代码
    pub code: String,
    pub name: String,
}

impl Province {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// 地级区划（地级市、自治州、地区、盟）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct City {
    /// 4 位代码，前 2 位为省代码
    pub code: String,
    pub name: String,
    pub province_code: String,
}

impl City {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        province_code: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            province_code: province_code.into(),
        }
    }
}

/// 县级区划（区、县、县级市、旗、开发区）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Area {
    /// 6 位代码，前 4 位为市代码
    pub code: String,
    pub name: String,
    pub city_code: String,
    pub province_code: String,
}

impl Area {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        city_code: impl Into<String>,
        province_code: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            city_code: city_code.into(),
            province_code: province_code.into(),
        }
    }
}

/// 解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParsedAddress {
    /// 省代码
    pub province_code: String,
    /// 市代码
    pub city_code: String,
    /// 区县代码，没能识别区县时为空
    pub area_code: Option<String>,
    /// 剩余详细地址
    pub detail: String,
}

impl ParsedAddress {
    /// 是否解析到了区县
    pub fn has_area(&self) -> bool {
        self.area_code.is_some()
    }

    /// 是否完整解析（区县和详细地址都有）
    pub fn is_complete(&self) -> bool {
        self.has_area() && !self.detail.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Province.to_string(), "province");
        assert_eq!(Level::Area.to_string(), "area");
        assert_eq!(Level::City.code_len(), 4);
    }

    #[test]
    fn test_parsed_address() {
        let addr = ParsedAddress {
            province_code: "44".to_string(),
            city_code: "4403".to_string(),
            area_code: Some("440305".to_string()),
            detail: "科技园".to_string(),
        };
        assert!(addr.has_area());
        assert!(addr.is_complete());

        let partial = ParsedAddress {
            area_code: None,
            ..addr
        };
        assert!(!partial.has_area());
        assert!(!partial.is_complete());
    }
}
