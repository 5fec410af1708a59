// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 管理页控制器
//!
//! 负责管理员登录、全部项目的拉取、可见性切换、删除与编辑。
//!
//! ## 约定
//! - 所有特权操作都使用会话中保存的密码，未登录时直接返回 `Unauthenticated`，不发请求。
//! - 可见性切换只在后端确认成功后修改本地状态；失败时本地状态保持不变，
//!   相当于把开关恢复到操作前的位置。
//! - 每个按钮在请求期间禁用，任何结果之后都会恢复。

use std::{collections::HashMap, sync::Arc};

use log::{error, info, warn};

use crate::{
    client::{ApiService, HttpTransport, Transport},
    exception::Exception,
    page::{Control, LoadState, Notice},
    project::{Project, ProjectChanges, ProjectStatus},
    session::AdminSession,
    validator::{first_error, validate_field, validate_form, FieldErrors},
};

/// 管理页统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdminStats {
    pub total: usize,
    pub visible: usize,
    pub hidden: usize,
}

/// 编辑弹窗中的草稿
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub email: String,
    pub team: String,
    pub github: String,
    pub demo: String,
    pub visible: bool,
}

impl EditDraft {
    fn from_project(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            title: project.title.clone(),
            description: project.description.clone(),
            status: project.status,
            email: project.email.clone(),
            team: project.team.clone(),
            github: project.github.clone().unwrap_or_default(),
            demo: project.demo.clone().unwrap_or_default(),
            visible: project.visible,
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = validate_form([
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("team", self.team.as_str()),
            ("email", self.email.as_str()),
        ]);
        for (field, value) in [("github", &self.github), ("demo", &self.demo)] {
            let validation = validate_field("link", value);
            if !validation.is_valid {
                errors.insert(field.to_string(), validation.message);
            }
        }
        errors
    }

    fn to_changes(&self) -> ProjectChanges {
        ProjectChanges {
            title: self.title.trim().to_string(),
            team: self.team.trim().to_string(),
            description: self.description.trim().to_string(),
            email: self.email.trim().to_string(),
            status: self.status,
            link: None,
            github: Some(self.github.trim().to_string()),
            demo: Some(self.demo.trim().to_string()),
            visible: Some(self.visible),
        }
    }
}

pub struct AdminPage<T: Transport = HttpTransport> {
    api: Arc<ApiService<T>>,
    session: AdminSession,
    projects: Vec<Project>,
    state: LoadState,
    notice: Option<Notice>,
    login_error: bool,
    login_button: Control,
    refresh_button: Control,
    toggles: HashMap<String, Control>,
    delete_target: Option<String>,
    delete_button: Control,
    edit_draft: Option<EditDraft>,
    edit_errors: FieldErrors,
    save_button: Control,
}

impl<T: Transport> AdminPage<T> {
    pub fn new(api: Arc<ApiService<T>>) -> Self {
        Self {
            api,
            session: AdminSession::new(),
            projects: vec![],
            state: LoadState::Idle,
            notice: None,
            login_error: false,
            login_button: Control::default(),
            refresh_button: Control::default(),
            toggles: HashMap::new(),
            delete_target: None,
            delete_button: Control::default(),
            edit_draft: None,
            edit_errors: FieldErrors::new(),
            save_button: Control::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn login_error(&self) -> bool {
        self.login_error
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// 登录：先校验密码，成功后建立会话并拉取全部项目。
    ///
    /// 密码为空或校验失败时设置登录错误标记并返回 `false`。
    pub async fn login(&mut self, password: &str) -> bool {
        let password = password.trim();
        if password.is_empty() {
            self.login_error = true;
            return false;
        }
        if !self.login_button.begin() {
            return false;
        }
        self.login_error = false;
        let result = self.api.verify_admin_password(password).await;
        self.login_button.finish();

        match result {
            Ok(true) => {
                self.session.sign_in(password);
                let _ = self.fetch_projects().await;
                true
            }
            Ok(false) => {
                warn!("管理员密码校验未通过");
                self.login_error = true;
                false
            }
            Err(e) => {
                error!("登录请求失败: {:?}", e);
                self.login_error = true;
                false
            }
        }
    }

    /// 登出并丢弃本页持有的全部数据
    pub fn logout(&mut self) {
        self.session.sign_out();
        self.projects.clear();
        self.toggles.clear();
        self.state = LoadState::Idle;
        self.delete_target = None;
        self.edit_draft = None;
        self.notice = None;
    }

    fn password(&self) -> Result<String, Exception> {
        self.session
            .password()
            .map(str::to_string)
            .ok_or(Exception::Unauthenticated)
    }

    /// 拉取全部项目（含隐藏项目）
    pub async fn fetch_projects(&mut self) -> Result<usize, Exception> {
        let password = self.password()?;
        if !self.refresh_button.begin() {
            return Ok(self.projects.len());
        }
        self.state = LoadState::Loading;
        let result = self.api.get_all_projects(&password).await;
        self.refresh_button.finish();

        match result {
            Ok(projects) => {
                self.projects = projects;
                self.state = LoadState::Ready;
                Ok(self.projects.len())
            }
            Err(e) => {
                error!("获取全部项目失败: {:?}", e);
                self.state = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    pub fn stats(&self) -> AdminStats {
        let total = self.projects.len();
        let visible = self.projects.iter().filter(|p| p.visible).count();
        AdminStats {
            total,
            visible,
            hidden: total - visible,
        }
    }

    /// 本地记录的可见性，即开关当前应显示的位置
    pub fn visibility_of(&self, id: &str) -> Option<bool> {
        self.projects.iter().find(|p| p.id == id).map(|p| p.visible)
    }

    /// 某个项目的可见性开关当前是否可用
    pub fn toggle_enabled(&self, id: &str) -> bool {
        self.toggles.get(id).map_or(true, Control::is_enabled)
    }

    /// 已建立开关状态的项目数
    pub fn tracked_toggles(&self) -> usize {
        self.toggles.len()
    }

    /// 切换可见性。失败时本地状态不变并给出错误提示。
    pub async fn toggle_visibility(&mut self, id: &str, visible: bool) -> Result<(), Exception> {
        let password = self.password()?;
        if !self.toggles.entry(id.to_string()).or_default().begin() {
            return Ok(());
        }
        let result = self.api.toggle_visibility(id, visible, "", &password).await;
        if let Some(control) = self.toggles.get_mut(id) {
            control.finish();
        }

        match result {
            Ok(()) => {
                if let Some(project) = self.projects.iter_mut().find(|p| p.id == id) {
                    project.visible = visible;
                }
                let verb = if visible { "shown" } else { "hidden" };
                info!("项目{}可见性已更新为{}", id, visible);
                self.notice = Some(Notice::success(format!("Project {} successfully", verb)));
                Ok(())
            }
            Err(e) => {
                self.notice = Some(Notice::from_exception(
                    "更新可见性失败",
                    &e,
                    "Failed to update visibility",
                ));
                Err(e)
            }
        }
    }

    /// 打开删除确认
    pub fn open_delete(&mut self, id: &str) -> Result<&Project, Exception> {
        match self.projects.iter().position(|p| p.id == id) {
            Some(index) => {
                self.delete_target = Some(id.to_string());
                Ok(&self.projects[index])
            }
            None => {
                self.notice = Some(Notice::error("Project not found"));
                Err(Exception::ProjectNotFound(id.to_string()))
            }
        }
    }

    pub fn close_delete(&mut self) {
        self.delete_target = None;
    }

    pub fn delete_target(&self) -> Option<&str> {
        self.delete_target.as_deref()
    }

    /// 确认删除当前目标；没有打开的删除确认时什么也不做
    pub async fn confirm_delete(&mut self) -> Result<(), Exception> {
        let id = match &self.delete_target {
            Some(id) => id.clone(),
            None => return Ok(()),
        };
        let password = self.password()?;
        if !self.delete_button.begin() {
            return Ok(());
        }
        let result = self.api.delete_project(&id, &password).await;
        self.delete_button.finish();

        match result {
            Ok(()) => {
                self.projects.retain(|p| p.id != id);
                self.toggles.remove(&id);
                self.close_delete();
                info!("项目{}已删除", id);
                self.notice = Some(Notice::success("Project deleted successfully"));
                Ok(())
            }
            Err(e) => {
                self.notice = Some(Notice::from_exception(
                    "删除项目失败",
                    &e,
                    "Failed to delete project",
                ));
                Err(e)
            }
        }
    }

    /// 打开编辑弹窗，草稿以当前项目数据填充
    pub fn open_edit(&mut self, id: &str) -> Result<&mut EditDraft, Exception> {
        let draft = match self.projects.iter().find(|p| p.id == id) {
            Some(project) => EditDraft::from_project(project),
            None => {
                self.notice = Some(Notice::error("Project not found"));
                return Err(Exception::ProjectNotFound(id.to_string()));
            }
        };
        self.edit_errors.clear();
        Ok(self.edit_draft.insert(draft))
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.edit_draft.as_mut()
    }

    pub fn edit_errors(&self) -> &FieldErrors {
        &self.edit_errors
    }

    pub fn close_edit(&mut self) {
        self.edit_draft = None;
        self.edit_errors.clear();
    }

    /// 保存编辑；没有打开的草稿时什么也不做
    pub async fn save_edit(&mut self) -> Result<(), Exception> {
        let draft = match &self.edit_draft {
            Some(draft) => draft.clone(),
            None => return Ok(()),
        };
        self.edit_errors = draft.validate();
        if let Some(e) = first_error(&self.edit_errors) {
            return Err(e);
        }
        if !self.save_button.begin() {
            return Ok(());
        }
        let changes = draft.to_changes();
        let result = self.api.update_project(&draft.id, changes.clone()).await;
        self.save_button.finish();

        match result {
            Ok(()) => {
                if let Some(project) = self.projects.iter_mut().find(|p| p.id == draft.id) {
                    project.apply(&changes);
                }
                self.close_edit();
                self.notice = Some(Notice::success("Project updated successfully"));
                Ok(())
            }
            Err(e) => {
                self.notice = Some(Notice::from_exception(
                    "更新项目失败",
                    &e,
                    "Failed to update project",
                ));
                Err(e)
            }
        }
    }
}
