// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 请求门面（ApiService）
//!
//! 所有页面控制器都通过这里访问后端。每个逻辑操作只发出一次 HTTP 请求：
//! 1. 由 `Framing` 策略决定报文形态；
//! 2. 通过 `Transport` 发送，并与配置的截止时间赛跑，超时即丢弃（取消）请求；
//! 3. 用 `response` 模块归一化响应并提取类型化结果。
//!
//! 门面本身不持有任何共享缓存，除网络请求外没有副作用。失败不会自动重试。

use std::{
    future::Future,
    pin::Pin,
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

use log::{debug, info, warn};
use reqwest::{header::CONTENT_TYPE, Method, Url};
use serde_json::Value;

use crate::{
    config::Config,
    exception::Exception,
    param::HttpMethod,
    project::{NewProject, Project, ProjectChanges},
    request::{Action, Framing, Outbound},
    response::{self, RawResponse},
};

/// 传输层返回的 Future
pub type SendFuture = Pin<Box<dyn Future<Output = Result<RawResponse, Exception>> + Send>>;

/// 发送一次请求的传输层抽象。
///
/// 返回的 Future 被丢弃时必须中止请求，门面依赖这一点实现超时取消。
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    fn send(&self, base_url: &str, outbound: &Outbound) -> SendFuture;
}

/// 基于 `reqwest` 的传输实现
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// 复用已有的 [`reqwest::Client`]（共享连接池）
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// 拼接基础地址、路径与查询参数，查询参数会被正确转义。
pub fn build_url(base_url: &str, outbound: &Outbound) -> Result<Url, Exception> {
    let mut url = Url::parse(&format!("{}{}", base_url, outbound.path))
        .map_err(|e| Exception::Config(format!("invalid backend url {}: {}", base_url, e)))?;
    if !outbound.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &outbound.query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

impl Transport for HttpTransport {
    fn send(&self, base_url: &str, outbound: &Outbound) -> SendFuture {
        let url = build_url(base_url, outbound);
        let client = self.client.clone();
        let outbound = outbound.clone();

        Box::pin(async move {
            let url = url?;
            let mut builder = client.request(to_reqwest_method(outbound.method), url);
            for (key, value) in &outbound.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            if let Some(body) = outbound.body {
                builder = builder.header(CONTENT_TYPE, outbound.content_type).body(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Exception::Network(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| Exception::Network(e.to_string()))?;
            Ok(RawResponse { status, body })
        })
    }
}

/// 请求门面
pub struct ApiService<T: Transport = HttpTransport> {
    transport: T,
    framing: Framing,
    base_url: String,
    timeout: Duration,
    next_id: AtomicU64,
}

impl ApiService<HttpTransport> {
    /// 按配置构造使用 `reqwest` 的门面
    pub fn from_config(config: &Config) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> ApiService<T> {
    pub fn with_transport(config: &Config, transport: T) -> Self {
        Self {
            transport,
            framing: Framing::from(config.environment()),
            base_url: config.api_url().to_string(),
            timeout: config.timeout(),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// 发送一个逻辑操作并返回归一化后的 JSON。
    pub async fn dispatch(&self, action: &Action) -> Result<Value, Exception> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let outbound = self.framing.frame(action);
        debug!(
            "[ID{}]{} -> {} {}{}",
            id,
            action.name(),
            outbound.method,
            self.base_url,
            outbound.path
        );

        let start_time = Instant::now();
        let pending = self.transport.send(&self.base_url, &outbound);
        let raw = match tokio::time::timeout(self.timeout, pending).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                warn!("[ID{}]{}请求失败：{:?}", id, action.name(), e);
                return Err(e);
            }
            Err(_) => {
                warn!(
                    "[ID{}]{}请求超过{}ms未完成，已取消",
                    id,
                    action.name(),
                    self.timeout.as_millis()
                );
                return Err(Exception::Timeout);
            }
        };

        info!(
            "[ID{}] {}, {}, {}, {}ms",
            id,
            action.name(),
            outbound.method,
            raw.status,
            start_time.elapsed().as_millis()
        );
        response::normalize(&raw, id)
    }

    /// 获取所有可见项目
    pub async fn get_projects(&self) -> Result<Vec<Project>, Exception> {
        let value = self.dispatch(&Action::ListVisible).await?;
        response::into_projects(value)
    }

    /// 获取全部项目（管理员）
    pub async fn get_all_projects(&self, password: &str) -> Result<Vec<Project>, Exception> {
        let value = self
            .dispatch(&Action::ListAll {
                password: password.to_string(),
            })
            .await?;
        response::into_projects(value)
    }

    /// 新建项目，返回后端分配的 ID
    pub async fn create_project(&self, project: NewProject) -> Result<String, Exception> {
        let value = self.dispatch(&Action::Create(project)).await?;
        response::into_created_id(value)
    }

    /// 更新项目
    pub async fn update_project(&self, id: &str, changes: ProjectChanges) -> Result<(), Exception> {
        let value = self
            .dispatch(&Action::Update {
                id: id.to_string(),
                changes,
            })
            .await?;
        response::into_ack(value)
    }

    /// 按邮箱查询名下项目
    pub async fn lookup_by_email(&self, email: &str) -> Result<Vec<Project>, Exception> {
        let value = self
            .dispatch(&Action::LookupByEmail {
                email: email.to_string(),
            })
            .await?;
        response::into_projects(value)
    }

    /// 切换可见性（管理员）
    pub async fn toggle_visibility(
        &self,
        id: &str,
        visible: bool,
        admin_notes: &str,
        password: &str,
    ) -> Result<(), Exception> {
        let value = self
            .dispatch(&Action::ToggleVisibility {
                id: id.to_string(),
                visible,
                admin_notes: admin_notes.to_string(),
                password: password.to_string(),
            })
            .await?;
        response::into_ack(value)
    }

    /// 删除项目（管理员）
    pub async fn delete_project(&self, id: &str, password: &str) -> Result<(), Exception> {
        let value = self
            .dispatch(&Action::Delete {
                id: id.to_string(),
                password: password.to_string(),
            })
            .await?;
        response::into_ack(value)
    }

    /// 校验管理员密码
    pub async fn verify_admin_password(&self, password: &str) -> Result<bool, Exception> {
        let value = self
            .dispatch(&Action::VerifyAdminPassword {
                password: password.to_string(),
            })
            .await?;
        Ok(response::into_verified(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Environment, project::ProjectStatus};
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize},
        Arc,
    };

    const BASE: &str = "https://backend.test/exec";

    fn service(mock: MockTransport, timeout_ms: u64) -> ApiService<MockTransport> {
        let config = Config::with_backend(Environment::Production, BASE, timeout_ms);
        ApiService::with_transport(&config, mock)
    }

    fn reply(status: u16, body: &'static str) -> SendFuture {
        Box::pin(async move { Ok(RawResponse::new(status, body)) })
    }

    fn new_project() -> NewProject {
        NewProject {
            title: "Rover".to_string(),
            team: "Ana, Bo".to_string(),
            description: "A small autonomous rover".to_string(),
            email: "ana@example.com".to_string(),
            status: ProjectStatus::NotStarted,
            link: None,
        }
    }

    #[tokio::test]
    async fn test_create_issues_exactly_one_call() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .withf(|base: &str, out: &Outbound| {
                base == BASE
                    && out.method == HttpMethod::Post
                    && out.json_body().map_or(false, |b| b["action"] == "create")
            })
            .returning(|_, _| reply(200, r#"{"success":true,"id":"p-42"}"#));

        let id = service(mock, 1000).create_project(new_project()).await.unwrap();
        assert_eq!(id, "p-42");
    }

    #[tokio::test]
    async fn test_timeout_cancels_in_flight_call() {
        let finished = Arc::new(AtomicBool::new(false));
        let finished_in_mock = Arc::clone(&finished);

        let mut mock = MockTransport::new();
        mock.expect_send().times(1).returning(move |_, _| {
            let finished = Arc::clone(&finished_in_mock);
            Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(200)).await;
                finished.store(true, Ordering::SeqCst);
                Ok(RawResponse::new(200, "[]"))
            })
        });

        let result = service(mock, 20).get_projects().await;
        assert_eq!(result, Err(Exception::Timeout));

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(!finished.load(Ordering::SeqCst), "超时后请求仍在执行");
    }

    #[tokio::test]
    async fn test_network_error_passes_through() {
        let mut mock = MockTransport::new();
        mock.expect_send().returning(|_, _| {
            Box::pin(async { Err(Exception::Network("connection refused".to_string())) })
        });

        let result = service(mock, 1000).get_projects().await;
        assert!(matches!(result, Err(Exception::Network(_))));
    }

    #[tokio::test]
    async fn test_toggle_unknown_id_is_rejected() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .returning(|_, _| reply(200, r#"{"error":"Project not found"}"#));

        let result = service(mock, 1000)
            .toggle_visibility("missing", true, "", "secret")
            .await;
        assert_eq!(
            result,
            Err(Exception::ServerRejected("Project not found".to_string()))
        );
    }

    #[tokio::test]
    async fn test_non_json_bodies() {
        let mut ok = MockTransport::new();
        ok.expect_send().returning(|_, _| reply(200, "Done"));
        assert!(service(ok, 1000).delete_project("p-1", "secret").await.is_ok());

        let mut broken = MockTransport::new();
        broken
            .expect_send()
            .returning(|_, _| reply(500, "<html>Internal Error</html>"));
        assert_eq!(
            service(broken, 1000).delete_project("p-1", "secret").await,
            Err(Exception::MalformedResponse)
        );
    }

    #[tokio::test]
    async fn test_verify_admin_password() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|_: &str, out: &Outbound| {
                out.json_body()
                    .map_or(false, |b| b["password"] == "right")
            })
            .returning(|_, _| reply(200, r#"{"success":true}"#));
        mock.expect_send()
            .withf(|_: &str, out: &Outbound| {
                out.json_body()
                    .map_or(false, |b| b["password"] == "wrong")
            })
            .returning(|_, _| reply(200, r#"{"success":false}"#));

        let api = service(mock, 1000);
        assert!(api.verify_admin_password("right").await.unwrap());
        assert!(!api.verify_admin_password("wrong").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_all_sends_password_query() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .withf(|_: &str, out: &Outbound| {
                out.method == HttpMethod::Get
                    && out.query.contains(&("password".to_string(), "secret".to_string()))
            })
            .returning(|_, _| reply(200, r#"[{"id":"a","visible":false},{"id":"b","visible":true}]"#));

        let projects = service(mock, 1000).get_all_projects("secret").await.unwrap();
        assert_eq!(projects.len(), 2);
    }

    #[tokio::test]
    async fn test_request_ids_increase() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut mock = MockTransport::new();
        mock.expect_send().times(3).returning(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            reply(200, "[]")
        });

        let api = service(mock, 1000);
        for _ in 0..3 {
            api.get_projects().await.unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(api.next_id.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_build_url_escapes_query() {
        let out = Framing::Script.frame(&Action::ListAll {
            password: "a&b c".to_string(),
        });
        let url = build_url(BASE, &out).unwrap();
        assert_eq!(
            url.as_str(),
            "https://backend.test/exec?action=all&password=a%26b+c"
        );
    }

    #[test]
    fn test_build_url_rest_path() {
        let out = Framing::Rest.frame(&Action::ListVisible);
        let url = build_url("http://127.0.0.1:3000/api", &out).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:3000/api/projects");
    }

    #[test]
    fn test_build_url_invalid_base() {
        let out = Framing::Rest.frame(&Action::ListVisible);
        assert!(matches!(
            build_url("not a url", &out),
            Err(Exception::Config(_))
        ));
    }
}
