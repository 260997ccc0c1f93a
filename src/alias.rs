//! 别名表构建
//!
//! 每一级区划对应一张 (别名, 代码) 有序表，按别名长度从长到短排列，
//! 匹配时依次尝试，保证较长、较具体的名字先于它的前缀被命中。
//! 区县名在不同城市间会重名，所以区县表按所属城市分开存放。

use crate::catalog::Catalog;
use crate::curated;
use std::cmp::Reverse;
use std::collections::HashMap;

/// 省级名称后缀
const PROVINCE_SUFFIXES: [&str; 3] = ["省", "市", "自治区"];

/// 区县名称后缀
const AREA_SUFFIXES: [&str; 3] = ["区", "县", "旗"];

/// 一条别名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub alias: String,
    pub code: String,
}

/// 有序别名表
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入一条别名
    ///
    /// 同一别名已存在时忽略：指向同一代码是正常的重复，指向不同代码则以先加入的为准。
    pub fn add(&mut self, alias: impl Into<String>, code: &str) {
        let alias = alias.into();
        if alias.is_empty() {
            return;
        }
        if let Some(existing) = self.entries.iter().find(|e| e.alias == alias) {
            if existing.code != code {
                log::debug!(
                    "alias {alias} already maps to {}, ignoring {code}",
                    existing.code
                );
            }
            return;
        }
        self.entries.push(AliasEntry {
            alias,
            code: code.to_string(),
        });
    }

    /// 按别名字符数从长到短排序，等长的保持加入顺序
    pub fn sort(&mut self) {
        self.entries
            .sort_by_key(|e| Reverse(e.alias.chars().count()));
    }

    /// 找到第一条是 `text` 前缀的别名
    pub fn find_prefix(&self, text: &str) -> Option<&AliasEntry> {
        self.find_prefix_where(text, |_| true)
    }

    /// 找到第一条是 `text` 前缀且满足条件的别名
    pub fn find_prefix_where(
        &self,
        text: &str,
        mut accept: impl FnMut(&AliasEntry) -> bool,
    ) -> Option<&AliasEntry> {
        self.entries
            .iter()
            .find(|e| text.starts_with(e.alias.as_str()) && accept(*e))
    }

    /// 精确查找别名
    pub fn lookup(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.alias == alias)
            .map(|e| e.code.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 各级别名表
#[derive(Debug, Default)]
pub struct AliasIndex {
    pub provinces: AliasTable,
    pub cities: AliasTable,
    /// 市代码 -> 该市下的区县别名表
    pub areas: HashMap<String, AliasTable>,
}

impl AliasIndex {
    /// 从字典生成全部别名表
    pub fn build(catalog: &Catalog) -> Self {
        let index = Self {
            provinces: province_table(catalog),
            cities: city_table(catalog),
            areas: area_tables(catalog),
        };
        log::debug!(
            "alias index: {} province, {} city, {} area aliases",
            index.provinces.len(),
            index.cities.len(),
            index.areas.values().map(AliasTable::len).sum::<usize>()
        );
        index
    }

    /// 某市下的区县别名表
    pub fn areas_of(&self, city_code: &str) -> Option<&AliasTable> {
        self.areas.get(city_code)
    }
}

/// 去掉后缀后剩余至少两个字才算有效简称
fn strip_suffix<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    name.strip_suffix(suffix)
        .filter(|stem| stem.chars().count() >= 2)
}

fn province_table(catalog: &Catalog) -> AliasTable {
    let mut t = AliasTable::new();
    for p in catalog.provinces() {
        t.add(p.name.as_str(), &p.code);
        for suffix in PROVINCE_SUFFIXES {
            if let Some(stem) = strip_suffix(&p.name, suffix) {
                t.add(stem, &p.code);
            }
        }
    }
    for (alias, code) in curated::PROVINCE_ALIASES {
        if catalog.province(code).is_some() {
            t.add(*alias, code);
        }
    }
    t.sort();
    t
}

fn city_table(catalog: &Catalog) -> AliasTable {
    let mut t = AliasTable::new();
    for c in catalog.cities() {
        // 直辖市的市辖区、县，省直辖县级行政区划在市一级都没名字
        if curated::is_placeholder_city(&c.name) {
            continue;
        }
        t.add(c.name.as_str(), &c.code);
        if let Some(stem) = strip_suffix(&c.name, "市") {
            t.add(stem, &c.code);
        }
        if let Some(stem) = strip_suffix(&c.name, "自治州") {
            t.add(stem, &c.code);
        }
        for suffix in ["地区", "盟"] {
            if let Some(stem) = strip_suffix(&c.name, suffix) {
                t.add(stem, &c.code);
                t.add(format!("{stem}市"), &c.code);
            }
        }
    }

    let prefectures = curated::PREFECTURES
        .iter()
        .flat_map(|(stem, code)| curated::prefecture_forms(stem).map(|f| (f, *code)));
    let literal = curated::CITY_ALIASES
        .iter()
        .map(|(alias, code)| (alias.to_string(), *code));
    for (alias, code) in prefectures.chain(literal) {
        if catalog.city(code).is_none() {
            log::trace!("skipping alias {alias}: city {code} not loaded");
            continue;
        }
        t.add(alias, code);
    }
    t.sort();
    t
}

fn area_tables(catalog: &Catalog) -> HashMap<String, AliasTable> {
    let mut tables: HashMap<String, AliasTable> = HashMap::new();
    for a in catalog.areas() {
        let t = tables.entry(a.city_code.clone()).or_default();
        t.add(a.name.as_str(), &a.code);
        for suffix in AREA_SUFFIXES {
            if let Some(stem) = strip_suffix(&a.name, suffix) {
                t.add(stem, &a.code);
            }
        }
        if a.name.ends_with("经济开发区") || a.name.ends_with("经济技术开发区") {
            t.add("经济开发区", &a.code);
            t.add("经开区", &a.code);
        }
        if a.name.ends_with("高新技术产业开发区") {
            t.add("高新区", &a.code);
        }
    }
    for t in tables.values_mut() {
        t.sort();
    }
    tables
}
