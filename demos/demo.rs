use cpca_code::Resolver;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
    let resolver = Resolver::from_dir(dir)?;

    println!("=== 地址编码解析演示 ===\n");

    let test_cases = vec![
        // 完整地址
        "安徽省合肥市高新区柏堰科技园石楠路13号",
        "广东省深圳市南山区科技园路1号",
        // 简称
        "广东深圳南山科技园",
        "中国，浙江杭州西湖区文三路",
        // 直辖市
        "北京市朝阳区建国路1号",
        "上海浦东新区世纪大道100号",
        "天津市市辖区南开区卫津路",
        "重庆市城口县葛城街道",
        // 自治区
        "宁夏银川市兴庆区解放西街",
        "广西南宁市青秀区民族大道",
        "内蒙古兴安盟乌兰浩特市五一路",
        // 自治州
        "贵州省黔东南州凯里市北京东路",
        "吉林延边延吉市河南街",
        // 没有区县
        "广东省东莞市长安镇振安路",
        // 无法识别
        "安徽省某某镇某某村三组",
        "某某路123号院",
        "上海",
    ];

    for addr in test_cases {
        println!("输入: \"{addr}\"");
        match resolver.resolve(addr) {
            Ok(result) => {
                println!("  省份: {}", result.province_code);
                println!("  城市: {}", result.city_code);
                println!("  区县: {}", result.area_code.as_deref().unwrap_or("-"));
                println!("  详址: \"{}\"", result.detail);
                println!("  标准: {}", resolver.full_name(&result));
                println!("  严格: {}", resolver.resolve_strict(addr).is_ok());
            }
            Err(e) => println!("  错误: {e}"),
        }
        println!();
    }

    println!("=== 名称查询演示 ===\n");

    for name in ["宁夏", "广西壮族自治区", "安徽"] {
        match resolver.parse_province_name(name) {
            Ok(code) => println!("parse_province_name(\"{name}\") => {code}"),
            Err(e) => println!("parse_province_name(\"{name}\") => {e}"),
        }
    }
    for name in ["合肥", "黔东南州", "克州"] {
        match resolver.parse_city_name(name) {
            Ok(city) => println!("parse_city_name(\"{name}\") => {} {}", city.code, city.name),
            Err(e) => println!("parse_city_name(\"{name}\") => {e}"),
        }
    }
    println!();
    for (code, name) in resolver.list_cities("34") {
        println!("{code} {name}");
        for (area_code, area_name) in resolver.list_areas(code) {
            println!("  {area_code} {area_name}");
        }
    }

    Ok(())
}
