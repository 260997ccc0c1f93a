//! 地址解析器核心实现

use crate::alias::{AliasEntry, AliasIndex, AliasTable};
use crate::catalog::Catalog;
use crate::config::Options;
use crate::curated;
use crate::division::{Area, City, Level, ParsedAddress, Province};
use crate::error::{LoadError, ResolveError};
use crate::loader;
use crate::normalize::normalize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 直辖市省名之后可能跟着的占位词
const MUNICIPALITY_TOKEN: &str = "市辖区";

/// 解析器构建器
///
/// 收集省、市、区县数据，全部加载完成后调用 [`build`](Self::build) 得到解析器。
/// 任何一步出错都应该放弃构建。
#[derive(Debug, Default)]
pub struct ResolverBuilder {
    catalog: Catalog,
    options: Options,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置解析选项
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// 从 CSV 读取省份（带表头）
    pub fn load_provinces(&mut self, reader: impl Read) -> Result<usize, LoadError> {
        loader::load_provinces(&mut self.catalog, reader)
    }

    /// 从 CSV 读取城市（带表头）
    pub fn load_cities(&mut self, reader: impl Read) -> Result<usize, LoadError> {
        loader::load_cities(&mut self.catalog, reader)
    }

    /// 从 CSV 读取区县（带表头）
    pub fn load_areas(&mut self, reader: impl Read) -> Result<usize, LoadError> {
        loader::load_areas(&mut self.catalog, reader)
    }

    pub fn add_province(&mut self, province: Province) -> Result<(), LoadError> {
        self.catalog.register_province(province)
    }

    pub fn add_city(&mut self, city: City) -> Result<(), LoadError> {
        self.catalog.register_city(city)
    }

    pub fn add_area(&mut self, area: Area) -> Result<(), LoadError> {
        self.catalog.register_area(area)
    }

    /// 校验数据并生成别名表
    pub fn build(self) -> Result<Resolver, LoadError> {
        self.catalog.validate()?;
        let index = AliasIndex::build(&self.catalog);
        let (p, c, a) = self.catalog.counts();
        log::info!("resolver ready: {p} provinces, {c} cities, {a} areas");
        Ok(Resolver {
            catalog: self.catalog,
            index,
            options: self.options,
        })
    }
}

/// 地址解析器
///
/// 构建完成后只读，可以在多个线程间共享引用并发解析。
#[derive(Debug)]
pub struct Resolver {
    catalog: Catalog,
    index: AliasIndex,
    options: Options,
}

impl Resolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// 从三个 CSV 数据源构建
    ///
    /// # 示例
    /// ```rust
    /// use cpca_code::Resolver;
    ///
    /// let provinces = "code,name\n34,安徽省\n";
    /// let cities = "code,name,provinceCode\n3401,合肥市,34\n";
    /// let areas = "code,name,cityCode,provinceCode\n340104,蜀山区,3401,34\n";
    ///
    /// let resolver =
    ///     Resolver::from_readers(provinces.as_bytes(), cities.as_bytes(), areas.as_bytes())
    ///         .unwrap();
    /// let addr = resolver.resolve("安徽合肥蜀山区黄山路").unwrap();
    /// assert_eq!(addr.area_code.as_deref(), Some("340104"));
    /// assert_eq!(addr.detail, "黄山路");
    /// ```
    pub fn from_readers(
        provinces: impl Read,
        cities: impl Read,
        areas: impl Read,
    ) -> Result<Self, LoadError> {
        let mut builder = ResolverBuilder::new();
        builder.load_provinces(provinces)?;
        builder.load_cities(cities)?;
        builder.load_areas(areas)?;
        builder.build()
    }

    /// 从目录读取 `provinces.csv`、`cities.csv`、`areas.csv`
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let open = |name: &str| {
            let path = dir.join(name);
            File::open(&path).map_err(|source| LoadError::Io {
                path: path.display().to_string(),
                source,
            })
        };
        Self::from_readers(
            open("provinces.csv")?,
            open("cities.csv")?,
            open("areas.csv")?,
        )
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// 解析地址，区县识别不出时仍然返回省市
    ///
    /// # 示例
    /// ```rust
    /// use cpca_code::{ResolveError, Resolver};
    ///
    /// let resolver = Resolver::from_readers(
    ///     "code,name\n11,北京市\n".as_bytes(),
    ///     "code,name,provinceCode\n1101,市辖区,11\n".as_bytes(),
    ///     "code,name,cityCode,provinceCode\n110105,朝阳区,1101,11\n".as_bytes(),
    /// )
    /// .unwrap();
    ///
    /// let addr = resolver.resolve("北京市朝阳区建国路1号").unwrap();
    /// assert_eq!(addr.city_code, "1101");
    /// assert_eq!(addr.area_code.as_deref(), Some("110105"));
    ///
    /// assert!(matches!(resolver.resolve("北京"), Err(ResolveError::TooShort(_))));
    /// ```
    pub fn resolve(&self, address: &str) -> Result<ParsedAddress, ResolveError> {
        let text = normalize(address, &self.options);
        if text.chars().count() < self.options.min_length {
            return Err(ResolveError::TooShort(address.to_string()));
        }

        let mut remaining = text;
        let mut result = ParsedAddress::default();

        // 第一步：匹配省份
        let province = self
            .index
            .provinces
            .find_prefix(remaining)
            .ok_or_else(|| ResolveError::InvalidAddress(address.to_string()))?;
        result.province_code = province.code.clone();
        remaining = consume(remaining, province);
        log::trace!("province {} via {}", province.code, province.alias);

        // 第二步：匹配城市，直辖市直接确定
        let municipality = curated::municipality_city(&result.province_code);
        if let Some(city_code) = municipality {
            result.city_code = city_code.to_string();
            remaining = remaining
                .strip_prefix(MUNICIPALITY_TOKEN)
                .unwrap_or(remaining);
        } else {
            let city = self
                .index
                .cities
                .find_prefix_where(remaining, |e| {
                    self.catalog
                        .city(&e.code)
                        .is_some_and(|c| c.province_code == result.province_code)
                })
                .ok_or_else(|| ResolveError::InvalidAddress(address.to_string()))?;
            result.city_code = city.code.clone();
            remaining = consume(remaining, city);
            log::trace!("city {} via {}", city.code, city.alias);
        }

        // 第三步：匹配区县，匹配不到不算失败
        let mut area = self.find_area(&result.city_code, remaining);
        if area.is_none() && municipality.is_some() {
            // 直辖市下的其他一级区划，如重庆的"县"
            let fallback = self
                .catalog
                .cities_of(&result.province_code)
                .filter(|c| c.code != result.city_code)
                .find_map(|c| self.find_area(&c.code, remaining).map(|e| (c, e)));
            if let Some((city, entry)) = fallback {
                result.city_code = city.code.clone();
                area = Some(entry);
            }
        }
        if let Some(area) = area {
            result.area_code = Some(area.code.clone());
            remaining = consume(remaining, area);
            log::trace!("area {} via {}", area.code, area.alias);
        }

        // 剩余部分作为详细地址
        result.detail = remaining.to_string();
        Ok(result)
    }

    /// 严格解析：必须识别出区县，并且有详细地址
    pub fn resolve_strict(&self, address: &str) -> Result<ParsedAddress, ResolveError> {
        let result = self.resolve(address)?;
        if !result.is_complete() {
            return Err(ResolveError::InvalidAddress(address.to_string()));
        }
        Ok(result)
    }

    /// 批量解析地址
    pub fn resolve_batch(&self, addresses: &[&str]) -> Vec<Result<ParsedAddress, ResolveError>> {
        addresses.iter().map(|a| self.resolve(a)).collect()
    }

    /// 检查地址是否至少能解析出省市
    pub fn is_resolvable(&self, address: &str) -> bool {
        self.resolve(address).is_ok()
    }

    /// 省级别名表，按匹配顺序
    pub fn province_aliases(&self) -> &AliasTable {
        &self.index.provinces
    }

    /// 市级别名表，按匹配顺序
    pub fn city_aliases(&self) -> &AliasTable {
        &self.index.cities
    }

    /// 某市下的区县别名表，按匹配顺序
    pub fn area_aliases(&self, city_code: &str) -> Option<&AliasTable> {
        self.index.areas_of(city_code)
    }

    fn find_area(&self, city_code: &str, text: &str) -> Option<&AliasEntry> {
        self.index
            .areas_of(city_code)
            .and_then(|t| t.find_prefix(text))
    }

    pub fn province_name(&self, code: &str) -> Result<&str, ResolveError> {
        self.catalog.name_of(Level::Province, code)
    }

    pub fn city_name(&self, code: &str) -> Result<&str, ResolveError> {
        self.catalog.name_of(Level::City, code)
    }

    pub fn area_name(&self, code: &str) -> Result<&str, ResolveError> {
        self.catalog.name_of(Level::Area, code)
    }

    /// 省份名称（含简称、别称）转代码
    pub fn parse_province_name(&self, name: &str) -> Result<&str, ResolveError> {
        self.index
            .provinces
            .lookup(name.trim())
            .ok_or_else(|| ResolveError::not_found(Level::Province, name))
    }

    /// 城市名称（含简称、别称）转城市
    pub fn parse_city_name(&self, name: &str) -> Result<&City, ResolveError> {
        self.index
            .cities
            .lookup(name.trim())
            .and_then(|code| self.catalog.city(code))
            .ok_or_else(|| ResolveError::not_found(Level::City, name))
    }

    /// 在指定城市下按名称（含简称）查找区县
    pub fn parse_area_name(&self, city_code: &str, name: &str) -> Result<&Area, ResolveError> {
        self.index
            .areas_of(city_code)
            .and_then(|t| t.lookup(name.trim()))
            .and_then(|code| self.catalog.area(code))
            .ok_or_else(|| ResolveError::not_found(Level::Area, name))
    }

    /// 全部省份：代码 -> 名称
    pub fn list_provinces(&self) -> BTreeMap<&str, &str> {
        self.catalog
            .provinces()
            .map(|p| (p.code.as_str(), p.name.as_str()))
            .collect()
    }

    /// 某省下的城市：代码 -> 名称
    pub fn list_cities(&self, province_code: &str) -> BTreeMap<&str, &str> {
        self.catalog
            .cities_of(province_code)
            .map(|c| (c.code.as_str(), c.name.as_str()))
            .collect()
    }

    /// 某市下的区县：代码 -> 名称
    pub fn list_areas(&self, city_code: &str) -> BTreeMap<&str, &str> {
        self.catalog
            .areas_of(city_code)
            .map(|a| (a.code.as_str(), a.name.as_str()))
            .collect()
    }

    /// 拼出标准的完整地址
    ///
    /// 直辖市的"市辖区"之类占位名不会出现在结果里。
    pub fn full_name(&self, parsed: &ParsedAddress) -> String {
        let mut result = String::new();
        if let Ok(p) = self.province_name(&parsed.province_code) {
            result.push_str(p);
        }
        if let Ok(c) = self.city_name(&parsed.city_code) {
            if !curated::is_placeholder_city(c) {
                result.push_str(c);
            }
        }
        if let Some(a) = parsed
            .area_code
            .as_deref()
            .and_then(|code| self.area_name(code).ok())
        {
            result.push_str(a);
        }
        result.push_str(&parsed.detail);
        result
    }
}

/// 从剩余文本中去掉已匹配的别名
fn consume<'a>(text: &'a str, entry: &AliasEntry) -> &'a str {
    &text[entry.alias.len()..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> Resolver {
        Resolver::from_readers(
            include_str!("../data/provinces.csv").as_bytes(),
            include_str!("../data/cities.csv").as_bytes(),
            include_str!("../data/areas.csv").as_bytes(),
        )
        .unwrap()
    }

    fn parsed(p: &str, c: &str, a: Option<&str>, detail: &str) -> ParsedAddress {
        ParsedAddress {
            province_code: p.to_string(),
            city_code: c.to_string(),
            area_code: a.map(str::to_string),
            detail: detail.to_string(),
        }
    }

    // ==================== 基本功能测试 ====================

    #[test]
    fn test_resolve_full_address() {
        let r = resolver();
        assert_eq!(
            r.resolve("安徽省合肥市高新区柏堰科技园石楠路13号").unwrap(),
            parsed("34", "3401", Some("340176"), "柏堰科技园石楠路13号")
        );
    }

    #[test]
    fn test_resolve_short_names() {
        let r = resolver();
        assert_eq!(
            r.resolve("广东深圳南山区科技园路1号").unwrap(),
            parsed("44", "4403", Some("440305"), "科技园路1号")
        );
        assert_eq!(
            r.resolve("广东省深圳市南山科技园").unwrap(),
            parsed("44", "4403", Some("440305"), "科技园")
        );
    }

    #[test]
    fn test_resolve_development_zone() {
        let r = resolver();
        let a = r.resolve("安徽省合肥市经开区繁华大道").unwrap();
        assert_eq!(a.area_code.as_deref(), Some("340177"));
        assert_eq!(a.detail, "繁华大道");

        let a = r.resolve("安徽省合肥市合肥新站高新技术产业开发区站前路").unwrap();
        assert_eq!(a.area_code.as_deref(), Some("340178"));
        assert_eq!(a.detail, "站前路");
    }

    #[test]
    fn test_resolve_with_country_and_punctuation() {
        let r = resolver();
        assert_eq!(
            r.resolve(" 中国，浙江省杭州市西湖区文三路。").unwrap(),
            parsed("33", "3301", Some("330106"), "文三路")
        );
    }

    // ==================== 直辖市测试 ====================

    #[test]
    fn test_resolve_municipality() {
        let r = resolver();
        assert_eq!(
            r.resolve("北京市朝阳区建国路1号").unwrap(),
            parsed("11", "1101", Some("110105"), "建国路1号")
        );
        assert_eq!(
            r.resolve("上海浦东新区世纪大道100号").unwrap(),
            parsed("31", "3101", Some("310115"), "世纪大道100号")
        );
    }

    #[test]
    fn test_resolve_municipality_token() {
        let r = resolver();
        assert_eq!(
            r.resolve("天津市市辖区南开区卫津路").unwrap(),
            parsed("12", "1201", Some("120104"), "卫津路")
        );
    }

    #[test]
    fn test_resolve_municipality_county() {
        // 重庆的县挂在 5002 下
        let r = resolver();
        assert_eq!(
            r.resolve("重庆市城口县葛城街道").unwrap(),
            parsed("50", "5002", Some("500229"), "葛城街道")
        );
        assert_eq!(
            r.resolve("重庆市渝中区解放碑").unwrap(),
            parsed("50", "5001", Some("500103"), "解放碑")
        );
    }

    #[test]
    fn test_same_area_name_in_different_cities() {
        let r = resolver();
        let beijing = r.resolve("北京市朝阳区望京街道").unwrap();
        let changchun = r.resolve("吉林省长春市朝阳区人民大街").unwrap();
        assert_eq!(beijing.area_code.as_deref(), Some("110105"));
        assert_eq!(changchun.area_code.as_deref(), Some("220104"));
    }

    // ==================== 别名测试 ====================

    #[test]
    fn test_curated_province_alias() {
        let r = resolver();
        assert_eq!(
            r.resolve("宁夏银川市兴庆区解放西街").unwrap(),
            parsed("64", "6401", Some("640104"), "解放西街")
        );
        assert_eq!(
            r.resolve("广西南宁市青秀区民族大道").unwrap(),
            parsed("45", "4501", Some("450103"), "民族大道")
        );
        assert_eq!(r.resolve("内蒙古省呼和浩特市新城区").unwrap().province_code, "15");
    }

    #[test]
    fn test_curated_prefecture_alias() {
        let r = resolver();
        assert_eq!(
            r.resolve("贵州省黔东南州凯里市北京东路").unwrap(),
            parsed("52", "5226", Some("522601"), "北京东路")
        );
        assert_eq!(
            r.resolve("吉林延边延吉市河南街").unwrap(),
            parsed("22", "2224", Some("222401"), "河南街")
        );
        assert_eq!(r.resolve("新疆克州阿图什市光明路").unwrap().city_code, "6530");
        assert_eq!(r.resolve("青海省海南州共和县").unwrap().city_code, "6325");
    }

    #[test]
    fn test_league_and_region_suffix() {
        let r = resolver();
        assert_eq!(
            r.resolve("内蒙古兴安盟乌兰浩特市五一路").unwrap(),
            parsed("15", "1522", Some("152201"), "五一路")
        );
        assert_eq!(r.resolve("新疆阿克苏地区阿克苏市").unwrap().city_code, "6529");
    }

    #[test]
    fn test_province_short_name_equals_city() {
        // "吉林" 既是省简称也是市简称
        let r = resolver();
        assert_eq!(
            r.resolve("吉林吉林市船营区德胜街").unwrap(),
            parsed("22", "2202", Some("220204"), "德胜街")
        );
    }

    // ==================== 缺省与错误测试 ====================

    #[test]
    fn test_missing_area_is_partial_success() {
        let r = resolver();
        assert_eq!(
            r.resolve("广东省东莞市长安镇振安路").unwrap(),
            parsed("44", "4419", None, "长安镇振安路")
        );
    }

    #[test]
    fn test_too_short() {
        let r = resolver();
        assert_eq!(
            r.resolve("上海"),
            Err(ResolveError::TooShort("上海".to_string()))
        );
        assert!(matches!(r.resolve("  中国北京市  "), Err(ResolveError::TooShort(_))));
    }

    #[test]
    fn test_no_province() {
        let r = resolver();
        assert!(matches!(
            r.resolve("某某路某某号院三号楼"),
            Err(ResolveError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_province_without_city() {
        let r = resolver();
        assert!(matches!(
            r.resolve("安徽省某某镇某某村三组"),
            Err(ResolveError::InvalidAddress(_))
        ));
        // 城市不属于该省
        assert!(matches!(
            r.resolve("安徽省深圳市南山区科技园"),
            Err(ResolveError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_resolve_strict() {
        let r = resolver();
        assert!(r.resolve_strict("安徽省合肥市蜀山区黄山路").is_ok());
        assert!(matches!(
            r.resolve_strict("广东省东莞市长安镇振安路"),
            Err(ResolveError::InvalidAddress(_))
        ));
        // 没有详细地址
        assert!(matches!(
            r.resolve_strict("安徽省合肥市蜀山区"),
            Err(ResolveError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_resolve_batch() {
        let r = resolver();
        let results = r.resolve_batch(&["北京市朝阳区建国路1号", "上海", "安徽省合肥市包河区"]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().area_code.as_deref(), Some("340111"));
        assert!(r.is_resolvable("四川省成都市武侯区"));
        assert!(!r.is_resolvable("四川省某某县"));
    }

    // ==================== 查询测试 ====================

    #[test]
    fn test_names_round_trip() {
        let r = resolver();
        for (code, name) in r.list_provinces() {
            assert_eq!(r.province_name(code), Ok(name));
            for (city_code, city_name) in r.list_cities(code) {
                assert_eq!(r.city_name(city_code), Ok(city_name));
                for (area_code, area_name) in r.list_areas(city_code) {
                    assert_eq!(r.area_name(area_code), Ok(area_name));
                }
            }
        }
        assert_eq!(
            r.area_name("999999"),
            Err(ResolveError::not_found(Level::Area, "999999"))
        );
    }

    #[test]
    fn test_parse_names() {
        let r = resolver();
        assert_eq!(r.parse_province_name("宁夏"), Ok("64"));
        assert_eq!(r.parse_province_name("安徽省"), Ok("34"));
        assert!(matches!(
            r.parse_province_name("火星"),
            Err(ResolveError::NotFound { level: Level::Province, .. })
        ));

        let city = r.parse_city_name("合肥").unwrap();
        assert_eq!(city.code, "3401");
        assert_eq!(city.province_code, "34");
        assert_eq!(r.parse_city_name("大理州").unwrap().code, "5329");
        assert!(r.parse_city_name("市辖区").is_err());

        assert_eq!(r.parse_area_name("3401", "蜀山").unwrap().code, "340104");
        assert!(r.parse_area_name("3402", "蜀山").is_err());
    }

    #[test]
    fn test_lists() {
        let r = resolver();
        assert_eq!(r.list_provinces().len(), 31);
        let cities = r.list_cities("34");
        assert_eq!(cities.get("3401"), Some(&"合肥市"));
        assert_eq!(cities.len(), 2);
        assert_eq!(r.list_areas("1101").get("110105"), Some(&"朝阳区"));
        assert!(r.list_areas("0000").is_empty());
    }

    #[test]
    fn test_full_name() {
        let r = resolver();
        let a = r.resolve("安徽合肥高新区石楠路13号").unwrap();
        assert_eq!(r.full_name(&a), "安徽省合肥市合肥高新技术产业开发区石楠路13号");

        let b = r.resolve("北京朝阳区建国路1号").unwrap();
        assert_eq!(r.full_name(&b), "北京市朝阳区建国路1号");
    }

    #[test]
    fn test_alias_tables_longest_first() {
        let r = resolver();
        let mut tables = vec![r.province_aliases(), r.city_aliases()];
        tables.extend(r.list_cities("34").keys().filter_map(|c| r.area_aliases(c)));
        for t in tables {
            let lens: Vec<usize> = t.iter().map(|e| e.alias.chars().count()).collect();
            assert!(lens.windows(2).all(|w| w[0] >= w[1]));
        }
        let t = r.city_aliases();
        let pos = |alias: &str| t.iter().position(|e| e.alias == alias).unwrap();
        assert!(pos("黔东南自治州") < pos("黔东南"));
    }

    // ==================== 构建测试 ====================

    #[test]
    fn test_duplicate_province_aborts_build() {
        let err = Resolver::from_readers(
            "code,name\n34,安徽省\n34,安徽\n".as_bytes(),
            "code,name,provinceCode\n".as_bytes(),
            "code,name,cityCode,provinceCode\n".as_bytes(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateCode { level: Level::Province, .. }));
    }

    #[test]
    fn test_unknown_parent_aborts_build() {
        let mut b = Resolver::builder();
        b.add_province(Province::new("34", "安徽省")).unwrap();
        b.add_city(City::new("3501", "福州市", "35")).unwrap();
        assert!(matches!(b.build(), Err(LoadError::UnknownParent { .. })));
    }

    #[test]
    fn test_from_dir() {
        let r = Resolver::from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/data")).unwrap();
        assert_eq!(r.list_provinces().len(), 31);

        let err = Resolver::from_dir("/nonexistent").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_custom_options() {
        let mut b = Resolver::builder().options(Options::new().min_length(4));
        b.load_provinces("code,name\n11,北京市\n".as_bytes()).unwrap();
        b.load_cities("code,name,provinceCode\n1101,市辖区,11\n".as_bytes())
            .unwrap();
        b.load_areas("code,name,cityCode,provinceCode\n110101,东城区,1101,11\n".as_bytes())
            .unwrap();
        let r = b.build().unwrap();
        assert_eq!(r.options().min_length, 4);
        assert_eq!(r.resolve("北京东城").unwrap().area_code.as_deref(), Some("110101"));
    }

    #[test]
    fn test_concurrent_resolve() {
        let r = resolver();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..100 {
                        let a = r.resolve("安徽省合肥市高新区柏堰科技园石楠路13号").unwrap();
                        assert_eq!(a.area_code.as_deref(), Some("340176"));
                    }
                });
            }
        });
    }
}
