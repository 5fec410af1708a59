// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 响应归一化模块
//!
//! 后端的两种部署形态返回的报文并不完全一致，这里把它们统一成
//! 调用方可以直接使用的结果：
//! - 正文能解析为 JSON：直接使用；若带有字符串 `error` 字段则视为后端拒绝。
//! - 正文无法解析但 HTTP 状态成功：合成 `{ "success": true, "data": <原文> }`。
//! - 正文无法解析且 HTTP 状态失败：`MalformedResponse`。

use log::{debug, warn};
use serde_json::{json, Value};

use crate::{exception::Exception, project::Project};

/// 传输层返回的原始响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 把原始响应转换为 JSON 值，并识别后端的结构化错误。
pub fn normalize(raw: &RawResponse, id: u64) -> Result<Value, Exception> {
    let value = match serde_json::from_str::<Value>(&raw.body) {
        Ok(v) => v,
        Err(_) if raw.is_success() => {
            debug!("[ID{}]响应正文不是JSON，状态码{}，合成成功结果", id, raw.status);
            return Ok(json!({ "success": true, "data": raw.body }));
        }
        Err(_) => {
            warn!("[ID{}]响应正文无法解析，状态码{}", id, raw.status);
            return Err(Exception::MalformedResponse);
        }
    };

    if let Some(message) = value
        .get("error")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
    {
        warn!("[ID{}]后端拒绝请求：{}", id, message);
        return Err(Exception::ServerRejected(message.to_string()));
    }
    Ok(value)
}

/// 从归一化结果中提取项目列表。
///
/// 接受三种形态：裸数组、`{ projects: [...] }`、`{ success: true, data: [...] }`。
pub fn into_projects(value: Value) -> Result<Vec<Project>, Exception> {
    let list = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => {
            if let Some(projects) = map.remove("projects") {
                projects
            } else if map.get("success").and_then(Value::as_bool) == Some(true)
                && map.get("data").map_or(false, Value::is_array)
            {
                map.remove("data").unwrap_or(Value::Null)
            } else {
                return Err(Exception::MalformedResponse);
            }
        }
        _ => return Err(Exception::MalformedResponse),
    };
    serde_json::from_value(list).map_err(|_| Exception::MalformedResponse)
}

/// 从创建结果中提取后端分配的项目 ID。
pub fn into_created_id(value: Value) -> Result<String, Exception> {
    reject_unsuccessful(&value, "Submission failed. Please try again.")?;
    match value.get("id") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(Exception::MalformedResponse),
    }
}

/// 通用确认：只要后端没有拒绝即视为成功。
pub fn into_ack(value: Value) -> Result<(), Exception> {
    reject_unsuccessful(&value, "Request failed. Please try again.")
}

/// 管理员密码校验结果
pub fn into_verified(value: Value) -> bool {
    value.get("success").and_then(Value::as_bool) == Some(true)
}

fn reject_unsuccessful(value: &Value, fallback: &str) -> Result<(), Exception> {
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(fallback);
        return Err(Exception::ServerRejected(message.to_string()));
    }
    Ok(())
}
