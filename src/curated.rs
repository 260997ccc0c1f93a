//! 人工维护的别名表
//!
//! 这里收录常被叫错或简写的区划名，作为自动生成别名之外的补充。
//! 只是数据，匹配算法不关心具体条目。

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 直辖市：省代码 -> 唯一的一级"市"代码
pub const MUNICIPALITIES: [(&str, &str); 4] = [
    ("11", "1101"), // 北京
    ("12", "1201"), // 天津
    ("31", "3101"), // 上海
    ("50", "5001"), // 重庆
];

static MUNICIPALITY_CITY: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| MUNICIPALITIES.iter().copied().collect());

/// 直辖市对应的一级市代码，非直辖市返回 `None`
pub fn municipality_city(province_code: &str) -> Option<&'static str> {
    MUNICIPALITY_CITY.get(province_code).copied()
}

/// 在市一级没有独立名字的占位区划
pub const PLACEHOLDER_CITY_NAMES: [&str; 4] = [
    "市辖区",
    "县",
    "省直辖县级行政区划",
    "自治区直辖县级行政区划",
];

pub fn is_placeholder_city(name: &str) -> bool {
    PLACEHOLDER_CITY_NAMES.contains(&name)
}

/// 容易被叫错的省级区划
pub const PROVINCE_ALIASES: &[(&str, &str)] = &[
    ("广西", "45"),
    ("广西省", "45"),
    ("广西自治区", "45"),
    ("宁夏", "64"),
    ("宁夏省", "64"),
    ("宁夏自治区", "64"),
    ("新疆", "65"),
    ("新疆省", "65"),
    ("新疆自治区", "65"),
    ("内蒙古", "15"),
    ("内蒙古省", "15"),
    ("内蒙古自治区", "15"),
    ("西藏", "54"),
    ("西藏省", "54"),
    ("西藏自治区", "54"),
];

/// 自治州的通俗叫法，每个都展开成 "X自治州" "X州" "X市" "X" 四种写法
pub const PREFECTURES: &[(&str, &str)] = &[
    ("延边", "2224"),
    ("恩施", "4228"),
    ("湘西", "4331"),
    ("阿坝", "5132"),
    ("甘孜", "5133"),
    ("凉山", "5134"),
    ("黔西南", "5223"),
    ("黔东南", "5226"),
    ("黔南", "5227"),
    ("楚雄", "5323"),
    ("红河", "5325"),
    ("文山", "5326"),
    ("西双版纳", "5328"),
    ("大理", "5329"),
    ("德宏", "5331"),
    ("怒江", "5333"),
    ("迪庆", "5334"),
    ("临夏", "6229"),
    ("甘南", "6230"),
    ("海北", "6322"),
    ("黄南", "6323"),
    ("果洛", "6326"),
    ("玉树", "6327"),
    ("海西", "6328"),
    ("昌吉", "6523"),
    ("博尔塔拉", "6527"),
    ("巴音郭楞", "6528"),
    ("伊犁", "6540"),
];

/// 不适合按四种写法展开的市级别名
///
/// 青海的海南州不能用 "海南" 单独指代，会和海南省冲突；克孜勒苏一般只叫克州。
pub const CITY_ALIASES: &[(&str, &str)] = &[
    ("海南自治州", "6325"),
    ("海南州", "6325"),
    ("海南市", "6325"),
    ("克州", "6530"),
];

/// 展开自治州的四种写法
pub fn prefecture_forms(stem: &str) -> [String; 4] {
    [
        format!("{stem}自治州"),
        format!("{stem}州"),
        format!("{stem}市"),
        stem.to_string(),
    ]
}
