//! 输入地址的规范化

use crate::config::Options;

/// 首尾需要去掉的标点
const TRIM_PUNCTUATION: [char; 4] = [',', '，', '。', '.'];

fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || TRIM_PUNCTUATION.contains(&c)
}

/// 去掉首尾空白和标点，再去掉开头的国家名
///
/// 返回原字符串的切片，不做复制。
pub fn normalize<'a>(input: &'a str, options: &Options) -> &'a str {
    let mut s = input.trim_matches(is_trimmable);
    for prefix in &options.country_prefixes {
        if let Some(rest) = s.strip_prefix(prefix.as_str()) {
            s = rest.trim_start_matches(is_trimmable);
            break;
        }
    }
    s
}
