//! 行政区划 CSV 数据读取
//!
//! 三个文件都带表头，依次为：
//! - 省：`code,name`
//! - 市：`code,name,provinceCode`
//! - 区县：`code,name,cityCode,provinceCode`
//!
//! 任何格式问题都会终止加载，不会跳过坏行。

use crate::catalog::Catalog;
use crate::division::{Area, City, Level, Province};
use crate::error::LoadError;
use std::io::Read;

/// 读取省份数据，返回读取的行数
pub fn load_provinces(catalog: &mut Catalog, reader: impl Read) -> Result<usize, LoadError> {
    for_each_row(Level::Province, 2, reader, |fields| {
        catalog.register_province(Province::new(fields[0], fields[1]))
    })
}

/// 读取城市数据，返回读取的行数
pub fn load_cities(catalog: &mut Catalog, reader: impl Read) -> Result<usize, LoadError> {
    for_each_row(Level::City, 3, reader, |fields| {
        catalog.register_city(City::new(fields[0], fields[1], fields[2]))
    })
}

/// 读取区县数据，返回读取的行数
pub fn load_areas(catalog: &mut Catalog, reader: impl Read) -> Result<usize, LoadError> {
    for_each_row(Level::Area, 4, reader, |fields| {
        catalog.register_area(Area::new(fields[0], fields[1], fields[2], fields[3]))
    })
}

/// 逐行读取并校验，跳过表头
///
/// 交给 `on_row` 的字段数已经确认等于 `columns`。
fn for_each_row(
    level: Level,
    columns: usize,
    reader: impl Read,
    mut on_row: impl FnMut(&[&str]) -> Result<(), LoadError>,
) -> Result<usize, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    if csv_reader.headers()?.is_empty() {
        return Err(LoadError::MissingHeader { level });
    }

    let mut count = 0;
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        let fields: Vec<&str> = record.iter().collect();
        if fields.len() != columns {
            return Err(malformed(
                level,
                line,
                format!("expected {columns} columns, got {}", fields.len()),
            ));
        }
        check_code(level, line, &fields)?;
        if fields[1].is_empty() {
            return Err(malformed(level, line, "empty name".to_string()));
        }
        on_row(&fields)?;
        count += 1;
    }

    log::debug!("loaded {count} {level} rows");
    Ok(count)
}

/// 代码必须是对应位数的数字，并且以上级代码开头
fn check_code(level: Level, line: u64, fields: &[&str]) -> Result<(), LoadError> {
    let code = fields[0];
    if code.len() != level.code_len() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(
            level,
            line,
            format!("code {code:?} is not a {}-digit number", level.code_len()),
        ));
    }
    // 上级代码列：市为省代码，区县为市代码和省代码
    for parent in &fields[2..] {
        if !code.starts_with(parent) || parent.is_empty() {
            return Err(malformed(
                level,
                line,
                format!("code {code} does not belong to parent {parent:?}"),
            ));
        }
    }
    Ok(())
}

fn malformed(level: Level, line: u64, reason: String) -> LoadError {
    LoadError::MalformedRow {
        level,
        line,
        reason,
    }
}
