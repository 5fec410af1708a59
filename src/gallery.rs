// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 画廊页控制器
//!
//! 拉取所有可见项目，支持按状态筛选与全文搜索，并给出统计数据和结果描述。
//! 页面状态全部由 `GalleryPage` 持有，不存在模块级全局变量。

use std::sync::Arc;

use log::{debug, error};

use crate::{
    client::{ApiService, HttpTransport, Transport},
    exception::Exception,
    page::{Control, LoadState},
    project::{Project, ProjectStatus},
    util::pluralize,
};

/// 状态筛选条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(ProjectStatus),
}

impl StatusFilter {
    /// 解析筛选条件，接受 `all`、状态标签或短横线形式（如 `in-progress`）
    pub fn parse(text: &str) -> Option<Self> {
        let normalized = text.trim().to_lowercase().replace(['-', '_'], " ");
        if normalized == "all" {
            return Some(StatusFilter::All);
        }
        ProjectStatus::ALL
            .iter()
            .find(|s| s.label().to_lowercase() == normalized)
            .map(|s| StatusFilter::Only(*s))
    }

    fn matches(&self, project: &Project) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => project.status == *status,
        }
    }
}

/// 顶部统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GalleryStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
}

pub struct GalleryPage<T: Transport = HttpTransport> {
    api: Arc<ApiService<T>>,
    projects: Vec<Project>,
    filter: StatusFilter,
    query: String,
    state: LoadState,
    retry_button: Control,
}

impl<T: Transport> GalleryPage<T> {
    pub fn new(api: Arc<ApiService<T>>) -> Self {
        Self {
            api,
            projects: vec![],
            filter: StatusFilter::All,
            query: String::new(),
            state: LoadState::Idle,
            retry_button: Control::default(),
        }
    }

    /// 拉取可见项目。失败时进入 `Failed` 状态，可再次调用重试。
    pub async fn fetch(&mut self) -> Result<usize, Exception> {
        if !self.retry_button.begin() {
            return Ok(self.projects.len());
        }
        self.state = LoadState::Loading;
        let result = self.api.get_projects().await;
        self.retry_button.finish();

        match result {
            Ok(projects) => {
                debug!("画廊载入{}个项目", projects.len());
                self.projects = projects;
                self.state = LoadState::Ready;
                Ok(self.projects.len())
            }
            Err(e) => {
                error!("获取项目列表失败: {:?}", e);
                self.state = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, raw: &str) {
        self.query = raw.trim().to_string();
    }

    pub fn clear_search(&mut self) {
        self.query.clear();
    }

    pub fn clear_all_filters(&mut self) {
        self.filter = StatusFilter::All;
        self.clear_search();
    }

    /// 经过筛选与搜索后的项目，保持后端返回顺序
    pub fn visible_projects(&self) -> Vec<&Project> {
        let query = self.query.to_lowercase();
        self.projects
            .iter()
            .filter(|p| self.filter.matches(p))
            .filter(|p| query.is_empty() || p.searchable_text().contains(&query))
            .collect()
    }

    pub fn stats(&self) -> GalleryStats {
        GalleryStats {
            total: self.projects.len(),
            completed: self
                .projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Completed)
                .count(),
            in_progress: self
                .projects
                .iter()
                .filter(|p| p.status == ProjectStatus::InProgress)
                .count(),
        }
    }

    /// 结果数量描述，例如 `Showing 2 projects matching "rover"`
    pub fn results_text(&self) -> String {
        let count = self.visible_projects().len();
        let mut text = match count {
            0 => "No projects found".to_string(),
            n => format!("Showing {}", pluralize(n, "project", "projects")),
        };
        if !self.query.is_empty() {
            text.push_str(&format!(" matching \"{}\"", self.query));
        }
        text
    }
}
