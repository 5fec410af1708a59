// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 字段校验器
//!
//! 纯函数、无状态：给定字段名和原始输入，依据规则表给出是否合法以及提示信息。
//! 所有长度与正则检查都针对去除首尾空白后的值进行。

use std::collections::BTreeMap;

use crate::{
    exception::Exception,
    param::{RuleTable, VALIDATION_RULES},
    util::capitalize,
};

/// 单个字段的校验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    /// 合法时为空字符串
    pub message: String,
}

impl Validation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }

    /// 转换为 `Result`，失败时携带字段名
    pub fn into_result(self, field: &str) -> Result<(), Exception> {
        if self.is_valid {
            Ok(())
        } else {
            Err(Exception::Validation {
                field: field.to_string(),
                message: self.message,
            })
        }
    }
}

/// 使用默认规则表校验单个字段。
pub fn validate_field(field: &str, value: &str) -> Validation {
    validate_with(&VALIDATION_RULES, field, value)
}

/// 使用指定的规则表校验单个字段。
///
/// 检查顺序：必填 -> 可选且为空 -> 最小长度 -> 最大长度 -> 正则。
pub fn validate_with(rules: &RuleTable, field: &str, value: &str) -> Validation {
    let rule = match rules.get(field) {
        Some(r) => r,
        None => return Validation::valid(),
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        if rule.required {
            return Validation::invalid(format!("{} is required", capitalize(field)));
        }
        return Validation::valid();
    }

    let length = trimmed.chars().count();
    if let Some(min) = rule.min_length {
        if length < min {
            return Validation::invalid(rule.message);
        }
    }
    if let Some(max) = rule.max_length {
        if length > max {
            return Validation::invalid(rule.message);
        }
    }
    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(trimmed) {
            return Validation::invalid(rule.message);
        }
    }

    Validation::valid()
}

/// 一次表单校验中失败的字段及其提示，按字段名排序
pub type FieldErrors = BTreeMap<String, String>;

/// 依次校验一组 `(字段名, 值)`，返回所有失败字段。
pub fn validate_form<'a, I>(fields: I) -> FieldErrors
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut errors = FieldErrors::new();
    for (field, value) in fields {
        let validation = validate_field(field, value);
        if !validation.is_valid {
            errors.insert(field.to_string(), validation.message);
        }
    }
    errors
}

/// 把表单错误中的第一个转换为 `Exception::Validation`。
pub fn first_error(errors: &FieldErrors) -> Option<Exception> {
    errors.iter().next().map(|(field, message)| Exception::Validation {
        field: field.clone(),
        message: message.clone(),
    })
}
