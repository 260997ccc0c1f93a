//! 行政区划字典：代码 -> 实体

use crate::division::{Area, City, Level, Province};
use crate::error::{LoadError, ResolveError};
use std::collections::BTreeMap;

/// 行政区划字典
///
/// 只在构建阶段写入，构建完成后由 [`Resolver`](crate::Resolver) 持有，不再修改。
#[derive(Debug, Default)]
pub struct Catalog {
    provinces: BTreeMap<String, Province>,
    cities: BTreeMap<String, City>,
    areas: BTreeMap<String, Area>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记省份，代码重复时返回错误
    pub fn register_province(&mut self, province: Province) -> Result<(), LoadError> {
        if let Some(existing) = self.provinces.get(&province.code) {
            return Err(duplicate(
                Level::Province,
                &province.code,
                &existing.name,
                &province.name,
            ));
        }
        self.provinces.insert(province.code.clone(), province);
        Ok(())
    }

    /// 登记城市，代码重复时返回错误
    pub fn register_city(&mut self, city: City) -> Result<(), LoadError> {
        if let Some(existing) = self.cities.get(&city.code) {
            return Err(duplicate(Level::City, &city.code, &existing.name, &city.name));
        }
        self.cities.insert(city.code.clone(), city);
        Ok(())
    }

    /// 登记区县，代码重复时返回错误
    pub fn register_area(&mut self, area: Area) -> Result<(), LoadError> {
        if let Some(existing) = self.areas.get(&area.code) {
            return Err(duplicate(Level::Area, &area.code, &existing.name, &area.name));
        }
        self.areas.insert(area.code.clone(), area);
        Ok(())
    }

    /// 检查上下级引用是否完整
    pub fn validate(&self) -> Result<(), LoadError> {
        for city in self.cities.values() {
            if !self.provinces.contains_key(&city.province_code) {
                return Err(LoadError::UnknownParent {
                    level: Level::City,
                    code: city.code.clone(),
                    parent: city.province_code.clone(),
                });
            }
        }
        for area in self.areas.values() {
            let parent_ok = self
                .cities
                .get(&area.city_code)
                .is_some_and(|c| c.province_code == area.province_code);
            if !parent_ok {
                return Err(LoadError::UnknownParent {
                    level: Level::Area,
                    code: area.code.clone(),
                    parent: format!("{}/{}", area.province_code, area.city_code),
                });
            }
        }
        Ok(())
    }

    /// 查询某级别代码对应的名称
    pub fn name_of(&self, level: Level, code: &str) -> Result<&str, ResolveError> {
        let name = match level {
            Level::Province => self.provinces.get(code).map(|p| p.name.as_str()),
            Level::City => self.cities.get(code).map(|c| c.name.as_str()),
            Level::Area => self.areas.get(code).map(|a| a.name.as_str()),
        };
        name.ok_or_else(|| ResolveError::not_found(level, code))
    }

    pub fn province(&self, code: &str) -> Option<&Province> {
        self.provinces.get(code)
    }

    pub fn city(&self, code: &str) -> Option<&City> {
        self.cities.get(code)
    }

    pub fn area(&self, code: &str) -> Option<&Area> {
        self.areas.get(code)
    }

    /// 按代码顺序遍历省份
    pub fn provinces(&self) -> impl Iterator<Item = &Province> {
        self.provinces.values()
    }

    /// 按代码顺序遍历城市
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    /// 按代码顺序遍历区县
    pub fn areas(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }

    /// 某省下的城市，按代码顺序
    pub fn cities_of<'a, 'p>(
        &'a self,
        province_code: &'p str,
    ) -> impl Iterator<Item = &'a City> + 'p
    where
        'a: 'p,
    {
        self.cities
            .values()
            .filter(move |c| c.province_code == province_code)
    }

    /// 某市下的区县，按代码顺序
    pub fn areas_of<'a, 'p>(&'a self, city_code: &'p str) -> impl Iterator<Item = &'a Area> + 'p
    where
        'a: 'p,
    {
        self.areas.values().filter(move |a| a.city_code == city_code)
    }

    /// (省, 市, 区县) 数量
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.provinces.len(), self.cities.len(), self.areas.len())
    }
}

fn duplicate(level: Level, code: &str, existing: &str, name: &str) -> LoadError {
    LoadError::DuplicateCode {
        level,
        code: code.to_string(),
        existing: existing.to_string(),
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut c = Catalog::new();
        c.register_province(Province::new("34", "安徽省")).unwrap();
        c.register_province(Province::new("11", "北京市")).unwrap();
        c.register_city(City::new("3401", "合肥市", "34")).unwrap();
        c.register_city(City::new("1101", "市辖区", "11")).unwrap();
        c.register_area(Area::new("340104", "蜀山区", "3401", "34"))
            .unwrap();
        c.register_area(Area::new("110105", "朝阳区", "1101", "11"))
            .unwrap();
        c
    }

    #[test]
    fn test_name_of() {
        let c = catalog();
        assert_eq!(c.name_of(Level::Province, "34"), Ok("安徽省"));
        assert_eq!(c.name_of(Level::City, "3401"), Ok("合肥市"));
        assert_eq!(c.name_of(Level::Area, "110105"), Ok("朝阳区"));
        assert_eq!(
            c.name_of(Level::City, "9999"),
            Err(ResolveError::not_found(Level::City, "9999"))
        );
    }

    #[test]
    fn test_duplicate_province() {
        let mut c = catalog();
        let err = c
            .register_province(Province::new("34", "皖省"))
            .unwrap_err();
        match err {
            LoadError::DuplicateCode {
                level,
                code,
                existing,
                name,
            } => {
                assert_eq!(level, Level::Province);
                assert_eq!(code, "34");
                assert_eq!(existing, "安徽省");
                assert_eq!(name, "皖省");
            }
            other => panic!("unexpected error: {other}"),
        }
        // 原数据不受影响
        assert_eq!(c.name_of(Level::Province, "34"), Ok("安徽省"));
    }

    #[test]
    fn test_duplicate_area() {
        let mut c = catalog();
        assert!(c
            .register_area(Area::new("340104", "蜀山", "3401", "34"))
            .is_err());
    }

    #[test]
    fn test_validate() {
        let mut c = catalog();
        assert!(c.validate().is_ok());

        c.register_city(City::new("9901", "不存在市", "99")).unwrap();
        assert!(matches!(
            c.validate(),
            Err(LoadError::UnknownParent { level: Level::City, .. })
        ));
    }

    #[test]
    fn test_children_in_code_order() {
        let mut c = catalog();
        c.register_city(City::new("3410", "黄山市", "34")).unwrap();
        let codes: Vec<_> = c.cities_of("34").map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["3401", "3410"]);

        let areas: Vec<_> = c.areas_of("3401").map(|a| a.name.as_str()).collect();
        assert_eq!(areas, vec!["蜀山区"]);
        assert_eq!(c.counts(), (2, 3, 2));
    }
}
