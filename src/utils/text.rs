//! 文本处理工具

use regex::Regex;

/// 标准化题干
///
/// 去掉行首的题号数字与行尾「（N.N分）」形式的分值标注。标准化后的
/// 题干既是缓存键也是查询载荷，该操作幂等。
pub fn normalize_title(title: &str) -> String {
    let mut result = title.to_string();
    if let Ok(re) = Regex::new(r"^\d+") {
        result = re.replace(&result, "").into_owned();
    }
    if let Ok(re) = Regex::new(r"（\d+\.\d+分）$") {
        result = re.replace(&result, "").into_owned();
    }
    result
}

/// 去掉选项行首的字母前缀（"A." "B、" "C " 等）
///
/// 搜题和 AI 答题都以选项内容为准，带着字母会让题库比对失败、
/// 让大模型只回字母不回内容。
pub fn strip_option_prefix(option: &str) -> String {
    match Regex::new(r"^[A-Za-z]\.?、?\s?") {
        Ok(re) => re.replace(option, "").into_owned(),
        Err(_) => option.to_string(),
    }
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(
            normalize_title("3（判断）今天是星期一（2.5分）"),
            "（判断）今天是星期一"
        );
        assert_eq!(normalize_title("12中国的首都是哪里"), "中国的首都是哪里");
        assert_eq!(normalize_title("没有前后缀的题干"), "没有前后缀的题干");
    }

    #[test]
    fn test_normalize_title_idempotent() {
        let titles = [
            "3（判断）今天是星期一（2.5分）",
            "（判断）今天是星期一",
            "1.5分不是结尾标注（1.5分）",
        ];
        for title in titles {
            let once = normalize_title(title);
            assert_eq!(normalize_title(&once), once);
        }
    }

    #[test]
    fn test_strip_option_prefix() {
        assert_eq!(strip_option_prefix("A. 北京"), "北京");
        assert_eq!(strip_option_prefix("B、上海"), "上海");
        assert_eq!(strip_option_prefix("C 广州"), "广州");
        assert_eq!(strip_option_prefix("d.深圳"), "深圳");
        // 非选项前缀的内容不受影响
        assert_eq!(strip_option_prefix("北京"), "北京");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("一二三四五", 3), "一二三...");
    }
}
