//! # CPCA Code - Chinese Province City Area code resolver
//!
//! 中国省市区地址编码解析库，把自由书写的地址拆成省、市、区县代码和剩余的详细地址。
//!
//! ## 功能特性
//!
//! - 按国家行政区划代码（省 2 位、市 4 位、区县 6 位）输出结果
//! - 自动生成简称（去掉 "省" "市" "地区" "盟" "区" "县" 等后缀）
//! - 内置自治区、自治州的常见叫法（如 "宁夏" "黔东南州" "克州"）
//! - 直辖市特殊处理，不需要写 "市辖区"
//! - 区县识别不出时仍返回省市，另有严格模式
//! - 解析器构建完成后只读，可跨线程共享
//!
//! 区划数据由调用方提供，格式见 [`ResolverBuilder`]。
//!
//! ## 快速开始
//!
//! ```rust
//! use cpca_code::Resolver;
//!
//! let resolver = Resolver::from_readers(
//!     "code,name\n34,安徽省\n".as_bytes(),
//!     "code,name,provinceCode\n3401,合肥市,34\n".as_bytes(),
//!     "code,name,cityCode,provinceCode\n340176,合肥高新技术产业开发区,3401,34\n".as_bytes(),
//! )
//! .unwrap();
//!
//! let addr = resolver.resolve("安徽省合肥市高新区柏堰科技园石楠路13号").unwrap();
//! assert_eq!(addr.province_code, "34");
//! assert_eq!(addr.city_code, "3401");
//! assert_eq!(addr.area_code.as_deref(), Some("340176"));
//! assert_eq!(addr.detail, "柏堰科技园石楠路13号");
//!
//! assert_eq!(resolver.city_name("3401").unwrap(), "合肥市");
//! ```

mod alias;
mod catalog;
mod config;
mod curated;
mod division;
mod error;
mod loader;
mod normalize;
mod resolver;

pub use alias::{AliasEntry, AliasTable};
pub use config::Options;
pub use division::{Area, City, Level, ParsedAddress, Province};
pub use error::{LoadError, ResolveError};
pub use resolver::{Resolver, ResolverBuilder};
