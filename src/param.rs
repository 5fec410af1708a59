// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 客户端参数与常量模块
//!
//! 该模块集中定义了画廊客户端使用的静态数据：
//! - 字段校验规则表（启动时编译正则，之后不可变）。
//! - 请求超时、秘密手势等常量。
//! - 与后端通信使用的 HTTP 方法和内容类型。

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

/// 默认的请求超时（毫秒）
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// 秘密手势：连续点击 Logo 的次数
pub const LOGO_CLICK_COUNT: u32 = 7;

/// 秘密手势：两次点击之间允许的最大间隔（毫秒），超过则计数清零
pub const CLICK_TIMEOUT_MS: u64 = 3_000;

/// 秘密手势：超过该次数后给出抖动反馈
pub const SHAKE_AFTER_CLICKS: u32 = 3;

/// 管理员凭据在 REST 模式下使用的请求头
pub const ADMIN_PASSWORD_HEADER: &str = "X-Admin-Password";

/// 脚本后端使用的内容类型，`text/plain` 不会触发 CORS 预检
pub const CONTENT_TYPE_PLAIN: &str = "text/plain";

/// REST 后端使用的内容类型
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 卡片描述默认截断长度
pub const CARD_DESCRIPTION_LENGTH: usize = 120;

/// 单个字段的校验规则。
#[derive(Debug, Clone)]
pub struct ValidationRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub message: &'static str,
}

/// 字段名到校验规则的映射表。
pub type RuleTable = HashMap<&'static str, ValidationRule>;

lazy_static! {
    /// 默认的字段校验规则表。
    pub static ref VALIDATION_RULES: RuleTable = {
        let mut map = HashMap::new();
        map.insert(
            "title",
            ValidationRule {
                required: true,
                min_length: Some(3),
                max_length: Some(100),
                pattern: None,
                message: "Project title must be between 3 and 100 characters",
            },
        );
        map.insert(
            "team",
            ValidationRule {
                required: true,
                min_length: Some(2),
                max_length: Some(200),
                pattern: None,
                message: "Team members field must be between 2 and 200 characters",
            },
        );
        map.insert(
            "email",
            ValidationRule {
                required: true,
                min_length: None,
                max_length: None,
                pattern: Some(Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()),
                message: "Please enter a valid email address",
            },
        );
        map.insert(
            "description",
            ValidationRule {
                required: true,
                min_length: Some(10),
                max_length: Some(1000),
                pattern: None,
                message: "Description must be between 10 and 1000 characters",
            },
        );
        map.insert(
            "link",
            ValidationRule {
                required: false,
                min_length: None,
                max_length: None,
                pattern: Some(
                    Regex::new(r"^(https?://)?([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}(/.*)?$").unwrap(),
                ),
                message: "Please enter a valid URL",
            },
        );
        map
    };
}

/// 与后端通信时使用的 HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for HttpMethod {
    /// 将枚举格式化为 HTTP 标准大写方法名
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Patch => write!(f, "PATCH"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}
