// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 请求构建模块
//!
//! 把一个逻辑操作（`Action`）翻译成一次具体的 HTTP 请求描述（`Outbound`）。
//! 同一套后端契约存在两种报文形态，由 `Framing` 策略在启动时根据配置选定：
//! 1. **Rest**：不同操作映射到不同的路径与 HTTP 方法，正文为 JSON。
//! 2. **Script**：所有写操作都是 `POST`，`Content-Type` 为 `text/plain`
//!    （避免 CORS 预检），操作名以 `action` 字段写在 JSON 正文中。
//!
//! 需要管理员权限的操作会附带管理员密码：Script 模式写入正文或查询参数，
//! Rest 模式写入 `X-Admin-Password` 请求头。

use serde_json::{json, Map, Value};

use crate::{
    config::Environment,
    param::{HttpMethod, ADMIN_PASSWORD_HEADER, CONTENT_TYPE_JSON, CONTENT_TYPE_PLAIN},
    project::{NewProject, ProjectChanges},
};

/// 后端支持的逻辑操作
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// 列出所有可见项目
    ListVisible,
    /// 列出全部项目（含隐藏项目），需要管理员密码
    ListAll { password: String },
    /// 新建项目
    Create(NewProject),
    /// 更新项目，`changes.email` 作为授权凭据
    Update { id: String, changes: ProjectChanges },
    /// 删除项目，需要管理员密码
    Delete { id: String, password: String },
    /// 切换项目可见性，需要管理员密码
    ToggleVisibility {
        id: String,
        visible: bool,
        admin_notes: String,
        password: String,
    },
    /// 按邮箱查询名下项目
    LookupByEmail { email: String },
    /// 校验管理员密码
    VerifyAdminPassword { password: String },
}

impl Action {
    /// 用于日志的操作名
    pub fn name(&self) -> &'static str {
        match self {
            Action::ListVisible => "list-visible",
            Action::ListAll { .. } => "list-all",
            Action::Create(_) => "create",
            Action::Update { .. } => "update",
            Action::Delete { .. } => "delete",
            Action::ToggleVisibility { .. } => "toggle-visibility",
            Action::LookupByEmail { .. } => "lookup-by-email",
            Action::VerifyAdminPassword { .. } => "verify-admin-password",
        }
    }

    /// 是否需要管理员凭据
    pub fn is_privileged(&self) -> bool {
        matches!(
            self,
            Action::ListAll { .. } | Action::Delete { .. } | Action::ToggleVisibility { .. }
        )
    }

    fn admin_password(&self) -> Option<&str> {
        match self {
            Action::ListAll { password }
            | Action::Delete { password, .. }
            | Action::ToggleVisibility { password, .. } => Some(password),
            _ => None,
        }
    }
}

/// 一次待发送的 HTTP 请求
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub method: HttpMethod,
    /// 拼接在基础地址之后的路径，可以为空
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub content_type: &'static str,
    pub body: Option<String>,
}

impl Outbound {
    fn new(method: HttpMethod, path: impl Into<String>, content_type: &'static str) -> Self {
        Self {
            method,
            path: path.into(),
            query: vec![],
            headers: vec![],
            content_type,
            body: None,
        }
    }

    fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 查询某个请求头
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// 把正文解析回 JSON，便于日志与测试
    pub fn json_body(&self) -> Option<Value> {
        self.body.as_deref().and_then(|b| serde_json::from_str(b).ok())
    }
}

/// 报文形态策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    Rest,
    Script,
}

impl From<Environment> for Framing {
    fn from(environment: Environment) -> Self {
        match environment {
            Environment::Local => Framing::Rest,
            Environment::Production => Framing::Script,
        }
    }
}

impl Framing {
    /// 把逻辑操作翻译为具体请求。
    pub fn frame(&self, action: &Action) -> Outbound {
        match self {
            Framing::Rest => frame_rest(action),
            Framing::Script => frame_script(action),
        }
    }
}

fn frame_rest(action: &Action) -> Outbound {
    let outbound = match action {
        Action::ListVisible => Outbound::new(HttpMethod::Get, "/projects", CONTENT_TYPE_JSON),
        Action::ListAll { .. } => {
            Outbound::new(HttpMethod::Get, "/projects/all", CONTENT_TYPE_JSON)
        }
        Action::Create(new_project) => {
            Outbound::new(HttpMethod::Post, "/projects", CONTENT_TYPE_JSON)
                .with_body(to_object(new_project))
        }
        Action::Update { id, changes } => {
            Outbound::new(HttpMethod::Put, format!("/projects/{}", id), CONTENT_TYPE_JSON)
                .with_body(to_object(changes))
        }
        Action::Delete { id, .. } => {
            Outbound::new(HttpMethod::Delete, format!("/projects/{}", id), CONTENT_TYPE_JSON)
        }
        Action::ToggleVisibility {
            id,
            visible,
            admin_notes,
            ..
        } => Outbound::new(
            HttpMethod::Patch,
            format!("/projects/{}/visibility", id),
            CONTENT_TYPE_JSON,
        )
        .with_body(json!({ "visible": visible, "adminNotes": admin_notes })),
        Action::LookupByEmail { email } => {
            Outbound::new(HttpMethod::Post, "/projects/lookup", CONTENT_TYPE_JSON)
                .with_body(json!({ "email": email }))
        }
        Action::VerifyAdminPassword { password } => {
            Outbound::new(HttpMethod::Post, "/admin/verify", CONTENT_TYPE_JSON)
                .with_body(json!({ "password": password }))
        }
    };

    match action.admin_password() {
        Some(password) => outbound.with_header(ADMIN_PASSWORD_HEADER, password),
        None => outbound,
    }
}

fn frame_script(action: &Action) -> Outbound {
    let post = |body: Value| Outbound::new(HttpMethod::Post, "", CONTENT_TYPE_PLAIN).with_body(body);

    match action {
        Action::ListVisible => Outbound::new(HttpMethod::Get, "", CONTENT_TYPE_PLAIN),
        Action::ListAll { password } => Outbound::new(HttpMethod::Get, "", CONTENT_TYPE_PLAIN)
            .with_query("action", "all")
            .with_query("password", password),
        Action::Create(new_project) => post(tagged("create", to_object(new_project), vec![])),
        Action::Update { id, changes } => post(tagged(
            "update",
            to_object(changes),
            vec![("id", json!(id))],
        )),
        Action::Delete { id, password } => post(json!({
            "action": "delete",
            "id": id,
            "password": password,
        })),
        Action::ToggleVisibility {
            id,
            visible,
            admin_notes,
            password,
        } => post(json!({
            "action": "visibility",
            "id": id,
            "visible": visible,
            "adminNotes": admin_notes,
            "password": password,
        })),
        Action::LookupByEmail { email } => post(json!({ "action": "lookup", "email": email })),
        Action::VerifyAdminPassword { password } => {
            post(json!({ "action": "verifyAdmin", "password": password }))
        }
    }
}

fn to_object<T: serde::Serialize>(payload: &T) -> Value {
    // 载荷都是普通结构体，序列化不会失败
    serde_json::to_value(payload).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// 生成 `{ action, <extra>..., <payload>... }` 形式的正文
fn tagged(action: &str, payload: Value, extra: Vec<(&str, Value)>) -> Value {
    let mut map = Map::new();
    map.insert("action".to_string(), json!(action));
    for (key, value) in extra {
        map.insert(key.to_string(), value);
    }
    if let Value::Object(fields) = payload {
        for (key, value) in fields {
            map.insert(key, value);
        }
    }
    Value::Object(map)
}
