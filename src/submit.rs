// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 提交页控制器
//!
//! 维护新项目表单（含可增删的团队成员列表），校验后创建项目。
//! 提交成功后返回新项目 ID 与用于后续编辑的邮箱，并重置表单。

use std::sync::Arc;

use log::info;

use crate::{
    client::{ApiService, HttpTransport, Transport},
    exception::Exception,
    page::{Control, Notice},
    project::{non_empty, NewProject, ProjectStatus},
    validator::{first_error, validate_form, FieldErrors},
};

/// 提交成功后的回执
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitForm {
    pub title: String,
    pub description: String,
    pub email: String,
    pub status: ProjectStatus,
    pub link: String,
    members: Vec<String>,
}

impl Default for SubmitForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            email: String::new(),
            status: ProjectStatus::NotStarted,
            link: String::new(),
            members: vec![String::new()],
        }
    }
}

impl SubmitForm {
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// 追加一个空的成员输入框，返回其下标
    pub fn add_member(&mut self) -> usize {
        self.members.push(String::new());
        self.members.len() - 1
    }

    /// 移除成员输入框，至少保留一个
    pub fn remove_member(&mut self, index: usize) -> bool {
        if self.members.len() <= 1 || index >= self.members.len() {
            return false;
        }
        self.members.remove(index);
        true
    }

    pub fn set_member(&mut self, index: usize, name: &str) -> bool {
        match self.members.get_mut(index) {
            Some(slot) => {
                *slot = name.to_string();
                true
            }
            None => false,
        }
    }

    /// 合并后的团队字段：去除空白与空项后以 `", "` 连接
    pub fn team(&self) -> String {
        self.members
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn validate(&self) -> FieldErrors {
        let team = self.team();
        validate_form([
            ("title", self.title.as_str()),
            ("team", team.as_str()),
            ("email", self.email.as_str()),
            ("description", self.description.as_str()),
            ("link", self.link.as_str()),
        ])
    }

    fn to_new_project(&self) -> NewProject {
        NewProject {
            title: self.title.trim().to_string(),
            team: self.team(),
            description: self.description.trim().to_string(),
            email: self.email.trim().to_string(),
            status: self.status,
            link: non_empty(&self.link),
        }
    }
}

pub struct SubmitPage<T: Transport = HttpTransport> {
    api: Arc<ApiService<T>>,
    form: SubmitForm,
    field_errors: FieldErrors,
    notice: Option<Notice>,
    submitted: Option<Submitted>,
    submit_button: Control,
}

impl<T: Transport> SubmitPage<T> {
    pub fn new(api: Arc<ApiService<T>>) -> Self {
        Self {
            api,
            form: SubmitForm::default(),
            field_errors: FieldErrors::new(),
            notice: None,
            submitted: None,
            submit_button: Control::default(),
        }
    }

    pub fn form(&self) -> &SubmitForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SubmitForm {
        &mut self.form
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn submitted(&self) -> Option<&Submitted> {
        self.submitted.as_ref()
    }

    /// 校验全部字段并记录错误，全部通过时返回 `true`
    pub fn validate(&mut self) -> bool {
        self.field_errors = self.form.validate();
        self.field_errors.is_empty()
    }

    /// 校验并提交。失败时保留表单内容，成功时重置表单。
    pub async fn submit(&mut self) -> Result<Submitted, Exception> {
        self.notice = None;
        self.submitted = None;
        if !self.validate() {
            return Err(first_error(&self.field_errors).unwrap_or(Exception::Validation {
                field: String::new(),
                message: "Please fix the errors above".to_string(),
            }));
        }
        if !self.submit_button.begin() {
            return Err(Exception::ServerRejected(
                "A submission is already in progress".to_string(),
            ));
        }
        let project = self.form.to_new_project();
        let email = project.email.clone();
        let result = self.api.create_project(project).await;
        self.submit_button.finish();

        match result {
            Ok(id) => {
                info!("新项目已提交: {}", id);
                let receipt = Submitted { id, email };
                self.notice = Some(Notice::success(format!(
                    "Project submitted! Use {} to edit it later. Project ID: {}",
                    receipt.email, receipt.id
                )));
                self.submitted = Some(receipt.clone());
                self.reset();
                Ok(receipt)
            }
            Err(e) => {
                self.notice = Some(Notice::from_exception(
                    "提交项目失败",
                    &e,
                    "An unexpected error occurred. Please try again later.",
                ));
                Err(e)
            }
        }
    }

    /// 清空表单与字段错误
    pub fn reset(&mut self) {
        self.form = SubmitForm::default();
        self.field_errors.clear();
    }
}
