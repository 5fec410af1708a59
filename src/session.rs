use log::info;

/// 管理员会话：只保存在内存中，页面（进程）结束或登出即清除，从不落盘。
#[derive(Default)]
pub struct AdminSession {
    authenticated: bool,
    password: Option<String>,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// 登录成功后记录状态与密码
    pub fn sign_in(&mut self, password: &str) {
        self.authenticated = true;
        self.password = Some(password.to_string());
        info!("管理员会话已建立");
    }

    pub fn sign_out(&mut self) {
        if self.authenticated {
            info!("管理员会话已清除");
        }
        self.authenticated = false;
        self.password = None;
    }

    /// 特权操作使用的凭据，未登录时为 `None`
    pub fn password(&self) -> Option<&str> {
        match self.authenticated {
            true => self.password.as_deref(),
            false => None,
        }
    }
}

impl std::fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSession")
            .field("authenticated", &self.authenticated)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}
