// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 秘密手势
//!
//! 连续点击 Logo 达到指定次数即进入管理员入口。两次点击间隔超过时限则计数清零。
//! 这只是一个便捷入口，不构成访问控制，真正的校验仍由后端完成。

use std::time::{Duration, Instant};

use log::debug;

use crate::param::{CLICK_TIMEOUT_MS, LOGO_CLICK_COUNT, SHAKE_AFTER_CLICKS};

/// 一次点击之后的反馈
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// 已计数，尚无反馈
    Counted(u32),
    /// 已计数，并给出抖动反馈
    Shake(u32),
    /// 达到次数，进入管理员入口；计数已清零
    Activated,
}

#[derive(Debug)]
pub struct SecretGesture {
    required: u32,
    window: Duration,
    count: u32,
    last_click: Option<Instant>,
}

impl Default for SecretGesture {
    fn default() -> Self {
        Self::new(LOGO_CLICK_COUNT, Duration::from_millis(CLICK_TIMEOUT_MS))
    }
}

impl SecretGesture {
    pub fn new(required: u32, window: Duration) -> Self {
        Self {
            required,
            window,
            count: 0,
            last_click: None,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// 在时刻 `now` 记录一次点击。
    pub fn click(&mut self, now: Instant) -> GestureEvent {
        if let Some(last) = self.last_click {
            if now.saturating_duration_since(last) > self.window {
                debug!("Logo点击间隔超时，计数清零");
                self.count = 0;
            }
        }
        self.last_click = Some(now);
        self.count += 1;

        if self.count >= self.required {
            self.count = 0;
            self.last_click = None;
            return GestureEvent::Activated;
        }
        if self.count > SHAKE_AFTER_CLICKS {
            GestureEvent::Shake(self.count)
        } else {
            GestureEvent::Counted(self.count)
        }
    }
}
