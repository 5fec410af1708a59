// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 编辑页控制器
//!
//! 提交者凭邮箱查找自己的项目，选中其中一个后编辑并保存。
//! 保存时使用查找时的邮箱作为修改授权。

use std::sync::Arc;

use log::info;

use crate::{
    client::{ApiService, HttpTransport, Transport},
    exception::Exception,
    page::{Control, Notice},
    project::{Project, ProjectChanges, ProjectStatus},
    validator::{first_error, validate_field, validate_form, FieldErrors},
};

const NO_PROJECTS: &str =
    "No projects found with this email address. Please check the email and try again.";
const UPDATED: &str =
    "Your project has been updated successfully! The changes will appear in the gallery shortly.";

/// 编辑表单
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub project_id: String,
    pub title: String,
    pub status: ProjectStatus,
    pub description: String,
    pub team: String,
    pub github: String,
    pub demo: String,
}

impl EditForm {
    fn from_project(project: &Project) -> Self {
        Self {
            project_id: project.id.clone(),
            title: project.title.clone(),
            status: project.status,
            description: project.description.clone(),
            team: project.team.clone(),
            github: project.github.clone().unwrap_or_default(),
            demo: project.demo.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = validate_form([
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("team", self.team.as_str()),
        ]);
        if !validate_field("link", &self.github).is_valid {
            errors.insert("github".to_string(), "Please enter a valid GitHub URL".to_string());
        }
        if !validate_field("link", &self.demo).is_valid {
            errors.insert("demo".to_string(), "Please enter a valid URL".to_string());
        }
        errors
    }

    fn to_changes(&self, email: &str) -> ProjectChanges {
        ProjectChanges {
            title: self.title.trim().to_string(),
            team: self.team.trim().to_string(),
            description: self.description.trim().to_string(),
            email: email.to_string(),
            status: self.status,
            link: None,
            github: Some(self.github.trim().to_string()),
            demo: Some(self.demo.trim().to_string()),
            visible: None,
        }
    }
}

pub struct EditPage<T: Transport = HttpTransport> {
    api: Arc<ApiService<T>>,
    email: String,
    projects: Vec<Project>,
    form: Option<EditForm>,
    field_errors: FieldErrors,
    notice: Option<Notice>,
    find_button: Control,
    save_button: Control,
}

impl<T: Transport> EditPage<T> {
    pub fn new(api: Arc<ApiService<T>>) -> Self {
        Self {
            api,
            email: String::new(),
            projects: vec![],
            form: None,
            field_errors: FieldErrors::new(),
            notice: None,
            find_button: Control::default(),
            save_button: Control::default(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn form(&self) -> Option<&EditForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut EditForm> {
        self.form.as_mut()
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// 按邮箱查找项目，返回找到的数量
    pub async fn find(&mut self, email: &str) -> Result<usize, Exception> {
        self.field_errors.clear();
        self.notice = None;
        if let Err(e) = validate_field("email", email).into_result("email") {
            if let Exception::Validation { message, .. } = &e {
                self.field_errors.insert("email".to_string(), message.clone());
            }
            return Err(e);
        }
        if !self.find_button.begin() {
            return Ok(self.projects.len());
        }
        let email = email.trim().to_string();
        let result = self.api.lookup_by_email(&email).await;
        self.find_button.finish();

        match result {
            Ok(projects) => {
                self.email = email;
                self.form = None;
                self.projects = projects;
                if self.projects.is_empty() {
                    self.notice = Some(Notice::error(NO_PROJECTS));
                }
                Ok(self.projects.len())
            }
            Err(e) => {
                self.notice = Some(Notice::from_exception(
                    "查找项目失败",
                    &e,
                    "Failed to find projects. Please try again.",
                ));
                Err(e)
            }
        }
    }

    /// 选中一个项目并以其数据填充表单
    pub fn select(&mut self, id: &str) -> Result<&mut EditForm, Exception> {
        let form = match self.projects.iter().find(|p| p.id == id) {
            Some(project) => EditForm::from_project(project),
            None => {
                self.notice = Some(Notice::error("Selected project not found."));
                return Err(Exception::ProjectNotFound(id.to_string()));
            }
        };
        self.field_errors.clear();
        self.notice = None;
        Ok(self.form.insert(form))
    }

    /// 保存当前表单
    pub async fn save(&mut self) -> Result<(), Exception> {
        let form = match &self.form {
            Some(form) => form.clone(),
            None => return Err(Exception::ProjectNotFound(String::new())),
        };
        self.notice = None;
        self.field_errors = form.validate();
        if let Some(e) = first_error(&self.field_errors) {
            return Err(e);
        }
        if !self.save_button.begin() {
            return Ok(());
        }
        let changes = form.to_changes(&self.email);
        let result = self.api.update_project(&form.project_id, changes.clone()).await;
        self.save_button.finish();

        match result {
            Ok(()) => {
                if let Some(project) = self.projects.iter_mut().find(|p| p.id == form.project_id) {
                    project.apply(&changes);
                }
                info!("项目{}已由提交者更新", form.project_id);
                self.notice = Some(Notice::success(UPDATED));
                Ok(())
            }
            Err(e) => {
                self.notice = Some(Notice::from_exception(
                    "更新项目失败",
                    &e,
                    "Failed to update project. Please try again.",
                ));
                Err(e)
            }
        }
    }

    /// 放弃编辑，回到项目列表
    pub fn cancel(&mut self) {
        self.form = None;
        self.field_errors.clear();
        self.notice = None;
    }
}
