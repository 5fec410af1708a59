// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 该模块定义了画廊客户端在一次用户操作生命周期中可能出现的各类异常情况。
//!
//! ## 分类
//! - **本地异常**：字段校验失败、配置无法读取、管理员未登录、本地列表中找不到项目。
//!   这些异常不会产生任何网络请求。
//! - **传输异常**：网络故障、请求超时。
//! - **后端异常**：响应体无法解析，或后端返回了结构化的错误信息（原样透传）。
//!
//! 通过实现 `std::fmt::Display`，所有异常都可以直接作为提示信息展示给用户。

use std::fmt;

/// 客户端处理一次操作过程中发生的异常类型。
#[derive(Debug, Clone, PartialEq)]
pub enum Exception {
    /// 某个字段未通过本地校验。只在客户端产生，永远不会到达网络层。
    Validation { field: String, message: String },
    /// 传输层失败，例如断网、DNS 解析失败、连接被拒绝。
    Network(String),
    /// 请求在配置的截止时间内没有完成，已在客户端中止。
    Timeout,
    /// 响应体无法解析，且 HTTP 状态码并不表示成功。
    MalformedResponse,
    /// 后端返回了结构化的错误信息，内容原样保留。
    ServerRejected(String),
    /// 配置文件无法读取。
    Config(String),
    /// 需要管理员凭据的操作在未登录状态下被调用。
    Unauthenticated,
    /// 页面本地持有的项目列表中没有该 ID。
    ProjectNotFound(String),
}

use Exception::*;

impl Exception {
    /// 是否属于本地异常（不应记录为网络错误日志）。
    pub fn is_local(&self) -> bool {
        matches!(self, Validation { .. } | Config(_) | Unauthenticated | ProjectNotFound(_))
    }
}

impl fmt::Display for Exception {
    /// 写入面向用户的描述文本。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation { message, .. } => write!(f, "{}", message),
            Network(_) => write!(
                f,
                "Network error. Please check your internet connection and try again."
            ),
            Timeout => write!(f, "Request timed out. Please try again."),
            MalformedResponse => write!(f, "Invalid response from server"),
            ServerRejected(message) => write!(f, "{}", message),
            Config(reason) => write!(f, "Configuration error: {}", reason),
            Unauthenticated => write!(f, "Admin login required"),
            ProjectNotFound(_) => write!(f, "Project not found"),
        }
    }
}

impl std::error::Error for Exception {}
