use middleware::{global::GlobalLimiter, window::WindowLimiter};

pub mod middleware {
    pub mod global;
    pub mod window;
}

pub fn global_middleware(permits_per_second: u32) -> GlobalLimiter {
    GlobalLimiter::new(permits_per_second)
}

/// Fixed-window per-IP limiter for a named scope (AI endpoints, account
/// operations). Counters live in Redis so they are shared across workers.
pub fn window_middleware(scope: &str, limit_per_minute: u32) -> WindowLimiter {
    WindowLimiter::new(scope, limit_per_minute)
}
