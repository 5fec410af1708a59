// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 项目数据模型
//!
//! 后端持有项目的权威数据，客户端只在每个页面的生命周期内保留一份内存副本。
//! 线上字段名使用 camelCase。表格型后端可能把 ID 写成数字、把布尔值写成
//! `"TRUE"` 字符串，这里的反序列化对此做了兼容。

use std::fmt;

use serde::de::{self, Deserializer};
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

/// 项目进度状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum ProjectStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::NotStarted,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }

    /// 解析状态标签，未知标签按“未开始”处理。
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "In Progress" => ProjectStatus::InProgress,
            "Completed" => ProjectStatus::Completed,
            _ => ProjectStatus::NotStarted,
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::NotStarted
    }
}

impl From<String> for ProjectStatus {
    fn from(label: String) -> Self {
        ProjectStatus::from_label(&label)
    }
}

/// 表格单元格可能是字符串、数字或空值，空值按“未开始”处理
impl<'de> serde::Deserialize<'de> for ProjectStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        string_from_any(deserializer).map(|label| ProjectStatus::from_label(&label))
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        status.label().to_string()
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 后端返回的项目实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    #[serde(default, deserialize_with = "string_from_any")]
    pub title: String,
    #[serde(default, deserialize_with = "string_from_any")]
    pub description: String,
    #[serde(default, deserialize_with = "string_from_any")]
    pub team: String,
    #[serde(default, deserialize_with = "string_from_any")]
    pub email: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(
        default,
        deserialize_with = "option_string_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<String>,
    #[serde(
        default,
        deserialize_with = "option_string_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub github: Option<String>,
    #[serde(
        default,
        deserialize_with = "option_string_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub demo: Option<String>,
    #[serde(default, deserialize_with = "bool_from_any")]
    pub visible: bool,
    #[serde(
        default,
        deserialize_with = "option_string_from_any",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
}

impl Project {
    /// 团队成员列表（按逗号拆分，去除空白）
    pub fn members(&self) -> Vec<&str> {
        self.team
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .collect()
    }

    /// 参与全文搜索的文本，已转为小写
    pub fn searchable_text(&self) -> String {
        [
            self.title.as_str(),
            self.team.as_str(),
            self.description.as_str(),
            self.status.label(),
        ]
        .join(" ")
        .to_lowercase()
    }

    /// 把一次成功的更新合并到本地副本
    pub fn apply(&mut self, changes: &ProjectChanges) {
        self.title = changes.title.clone();
        self.team = changes.team.clone();
        self.description = changes.description.clone();
        self.email = changes.email.clone();
        self.status = changes.status;
        if changes.link.is_some() {
            self.link = changes.link.clone();
        }
        if let Some(github) = &changes.github {
            self.github = non_empty(github);
        }
        if let Some(demo) = &changes.demo {
            self.demo = non_empty(demo);
        }
        if let Some(visible) = changes.visible {
            self.visible = visible;
        }
    }
}

/// 新建项目时提交的数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub title: String,
    pub team: String,
    pub description: String,
    pub email: String,
    pub status: ProjectStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// 更新项目时提交的数据。`email` 同时充当修改授权凭据。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectChanges {
    pub title: String,
    pub team: String,
    pub description: String,
    pub email: String,
    pub status: ProjectStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// `None` 表示不修改，`Some("")` 表示清除
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

/// 把空白字符串折叠为 `None`
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match <Value as serde::Deserialize>::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("invalid project id: {}", other))),
    }
}

/// 文本单元格：数字与布尔值转为文本，空值为空字符串
fn string_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match <Value as serde::Deserialize>::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!("invalid text cell: {}", other))),
    }
}

fn option_string_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    string_from_any(deserializer).map(|s| non_empty(&s))
}

fn bool_from_any<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match <Value as serde::Deserialize>::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::String(s) => Ok(s.trim().eq_ignore_ascii_case("true")),
        Value::Null => Ok(false),
        other => Err(de::Error::custom(format!("invalid visibility flag: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_project() {
        let project: Project = serde_json::from_value(json!({
            "id": "p-1",
            "title": "Rover",
            "description": "A small autonomous rover",
            "team": "Ana, Bo",
            "email": "ana@example.com",
            "status": "In Progress",
            "github": "https://github.com/x/rover",
            "visible": true,
            "createdAt": "2025-01-05T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(project.id, "p-1");
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.members(), vec!["Ana", "Bo"]);
        assert!(project.visible);
        assert_eq!(project.created_at.as_deref(), Some("2025-01-05T10:00:00Z"));
        assert!(project.demo.is_none());
    }

    #[test]
    fn test_lenient_id_and_visibility() {
        let project: Project = serde_json::from_value(json!({
            "id": 17,
            "title": "Sheet row",
            "status": "Something else",
            "visible": "TRUE"
        }))
        .unwrap();

        assert_eq!(project.id, "17");
        assert_eq!(project.status, ProjectStatus::NotStarted);
        assert!(project.visible);
    }

    #[test]
    fn test_missing_visibility_defaults_hidden() {
        let project: Project = serde_json::from_value(json!({ "id": "a" })).unwrap();
        assert!(!project.visible);
    }

    #[test]
    fn test_new_project_omits_empty_link() {
        let new_project = NewProject {
            title: "Rover".to_string(),
            team: "Ana".to_string(),
            description: "A small autonomous rover".to_string(),
            email: "ana@example.com".to_string(),
            status: ProjectStatus::Completed,
            link: None,
        };
        let value = serde_json::to_value(&new_project).unwrap();
        assert_eq!(value["status"], "Completed");
        assert!(value.get("link").is_none());
    }

    #[test]
    fn test_apply_changes() {
        let mut project: Project = serde_json::from_value(json!({
            "id": "a",
            "title": "Old",
            "github": "https://github.com/ana/old",
            "visible": false
        }))
        .unwrap();
        let changes = ProjectChanges {
            title: "New".to_string(),
            team: "Ana".to_string(),
            description: "Updated description".to_string(),
            email: "ana@example.com".to_string(),
            status: ProjectStatus::Completed,
            link: None,
            github: Some(String::new()),
            demo: Some(" https://demo.example.com ".to_string()),
            visible: Some(true),
        };
        project.apply(&changes);

        assert_eq!(project.title, "New");
        assert_eq!(project.status, ProjectStatus::Completed);
        assert!(project.github.is_none());
        assert_eq!(project.demo.as_deref(), Some("https://demo.example.com"));
        assert!(project.visible);
    }

    #[test]
    fn test_searchable_text_includes_status() {
        let project: Project = serde_json::from_value(json!({
            "id": "a", "title": "Rover", "team": "Ana", "description": "Robot", "status": "Completed"
        }))
        .unwrap();
        let text = project.searchable_text();
        assert!(text.contains("rover"));
        assert!(text.contains("completed"));
    }

    #[test]
    fn test_numeric_and_null_cells() {
        let project: Project = serde_json::from_value(json!({
            "id": 2,
            "title": 2048,
            "team": null,
            "description": true,
            "status": null,
            "github": null,
            "createdAt": null
        }))
        .unwrap();

        assert_eq!(project.title, "2048");
        assert_eq!(project.team, "");
        assert_eq!(project.description, "true");
        assert_eq!(project.status, ProjectStatus::NotStarted);
        assert!(project.github.is_none());
        assert!(project.created_at.is_none());
    }

    #[test]
    fn test_numeric_status_cell_falls_back() {
        let project: Project =
            serde_json::from_value(json!({ "id": "a", "status": 3 })).unwrap();
        assert_eq!(project.status, ProjectStatus::NotStarted);
    }
}
