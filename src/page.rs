//! 页面控制器共用的状态类型：按钮、提示、加载状态。

use log::error;

use crate::exception::Exception;

/// 一个会触发网络请求的按钮。
///
/// 请求期间处于禁用状态，任何结果（成功、失败、超时）之后都会重新启用，
/// 从而保证同一按钮不会有重叠的请求。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Control {
    busy: bool,
}

impl Control {
    pub fn is_enabled(&self) -> bool {
        !self.busy
    }

    /// 开始一次请求；按钮已禁用时返回 `false`
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn finish(&mut self) {
        self.busy = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// 面向用户的提示（toast 或内联提示）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// 在操作边界把异常转为提示，并记录非本地异常。
    ///
    /// 后端拒绝、超时等异常自带用户可读的文本；其余情况使用 `fallback`。
    pub fn from_exception(context: &str, e: &Exception, fallback: &str) -> Self {
        if !e.is_local() {
            error!("{}: {:?}", context, e);
        }
        let message = match e {
            Exception::Network(_)
            | Exception::Timeout
            | Exception::MalformedResponse
            | Exception::ServerRejected(_)
            | Exception::Validation { .. }
            | Exception::ProjectNotFound(_)
            | Exception::Unauthenticated => e.to_string(),
            Exception::Config(_) => fallback.to_string(),
        };
        Self::error(message)
    }
}

/// 列表页的加载状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_blocks_overlap() {
        let mut control = Control::default();
        assert!(control.is_enabled());
        assert!(control.begin());
        assert!(!control.is_enabled());
        assert!(!control.begin());
        control.finish();
        assert!(control.is_enabled());
        assert!(control.begin());
    }

    #[test]
    fn test_notice_from_exception() {
        let notice = Notice::from_exception(
            "删除项目失败",
            &Exception::ServerRejected("Project not found".to_string()),
            "Failed to delete project",
        );
        assert_eq!(notice, Notice::error("Project not found"));

        let notice = Notice::from_exception(
            "读取配置失败",
            &Exception::Config("bad".to_string()),
            "Something went wrong",
        );
        assert_eq!(notice.message, "Something went wrong");
    }
}
