//! 异步请求的代际令牌
//!
//! 每个可变 UI 区域持有一个 [`Generation`]。发起异步请求时取出一个 [`Token`]，
//! 响应回来时用同一个令牌核对；令牌已过期则丢弃响应。
//!
//! 令牌值在进程内全局唯一，重建的区域不会误收旧区域的响应。

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// 请求令牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Token(u64);

impl Token {
    /// 令牌的原始值（用于日志）
    pub fn value(self) -> u64 {
        self.0
    }
}

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

fn fresh() -> u64 {
    NEXT_TOKEN.fetch_add(1, Ordering::Relaxed)
}

/// 代际计数器
#[derive(Debug, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// 发放新令牌，之前发放的令牌全部失效
    pub fn next(&mut self) -> Token {
        self.current = fresh();
        Token(self.current)
    }

    /// 当前有效的令牌
    pub fn current(&self) -> Token {
        Token(self.current)
    }

    pub fn is_current(&self, token: Token) -> bool {
        token.0 == self.current
    }

    /// 核对令牌，过期时返回 `StaleResponse`
    pub fn check(&self, token: Token) -> CoreResult<()> {
        if self.is_current(token) {
            Ok(())
        } else {
            log::debug!(
                "Discarding stale response: token {} (current {})",
                token.0,
                self.current
            );
            Err(CoreError::StaleResponse)
        }
    }

    /// 使所有已发放的令牌失效
    pub fn invalidate(&mut self) {
        self.current = fresh();
    }
}
