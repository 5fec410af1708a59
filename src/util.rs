use chrono::{DateTime, NaiveDate};

/// 首字母大写，用于生成 “<Field> is required” 之类的提示。
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 截断过长文本，截断后去除尾部空白并追加省略号。
pub fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let head: String = text.chars().take(max_length).collect();
    format!("{}...", head.trim())
}

/// 把后端给出的时间戳格式化为 `Jan 5, 2025` 的形式。
///
/// 支持 RFC 3339 与纯日期 `YYYY-MM-DD`，无法识别时返回 `None`。
pub fn format_date(date_string: &str) -> Option<String> {
    let trimmed = date_string.trim();
    let date = match DateTime::parse_from_rfc3339(trimmed) {
        Ok(dt) => dt.date_naive(),
        Err(_) => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?,
    };
    Some(date.format("%b %-d, %Y").to_string())
}

/// 控制台中清空字段的输入
pub const CLEAR_TOKEN: &str = "-";

/// 解释一行编辑输入：空行保留原值，`-` 清空，其余为新值
pub fn field_input(line: &str, current: &str) -> String {
    match line.trim() {
        "" => current.to_string(),
        CLEAR_TOKEN => String::new(),
        value => value.to_string(),
    }
}

/// 单复数文案
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("title"), "Title");
        assert_eq!(capitalize("e"), "E");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_trims_before_ellipsis() {
        assert_eq!(truncate("hello world again", 6), "hello...");
        assert_eq!(truncate("abcdefgh", 3), "abc...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("多字节字符串", 2), "多字...");
    }

    #[test]
    fn test_format_date_rfc3339() {
        assert_eq!(
            format_date("2025-01-05T10:00:00.000Z").as_deref(),
            Some("Jan 5, 2025")
        );
    }

    #[test]
    fn test_format_date_plain() {
        assert_eq!(format_date("2024-12-31").as_deref(), Some("Dec 31, 2024"));
    }

    #[test]
    fn test_format_date_invalid() {
        assert!(format_date("yesterday").is_none());
        assert!(format_date("").is_none());
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "project", "projects"), "1 project");
        assert_eq!(pluralize(3, "project", "projects"), "3 projects");
    }

    #[test]
    fn test_field_input() {
        assert_eq!(field_input("", "https://github.com/a/b"), "https://github.com/a/b");
        assert_eq!(field_input(" - ", "https://github.com/a/b"), "");
        assert_eq!(field_input(" new ", "old"), "new");
    }
}
