use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static PERF_ENABLED: AtomicBool = AtomicBool::new(true);

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 根据环境变量设置耗时统计开关
///
/// 开关：
/// - 默认开启
/// - `SUBSIDY_OPTIMIZER_PERF=0` 关闭
pub fn configure_from_env() {
    let enabled = match std::env::var("SUBSIDY_OPTIMIZER_PERF") {
        Ok(v) => is_true(&v),
        Err(_) => true,
    };
    PERF_ENABLED.store(enabled, Ordering::Relaxed);
}

/// 性能统计 Guard：记录 elapsed_ms + 处理条目数 + 嵌套深度
///
/// 使用方式：
/// ```ignore
/// let mut perf = subsidy_optimizer::perf::PerfGuard::new("optimize");
/// perf.set_items(candidates.len());
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    items: usize,
    depth: u32,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let depth = PERF_DEPTH.with(|d| {
            let next = d.get().saturating_add(1);
            d.set(next);
            next
        });
        Self {
            op,
            start: Instant::now(),
            items: 0,
            depth,
        }
    }

    /// 记录本次处理的条目数（候选数/企业数）
    pub fn set_items(&mut self, items: usize) {
        self.items = items;
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        if PERF_ENABLED.load(Ordering::Relaxed) {
            let elapsed_ms = self.start.elapsed().as_millis() as u64;
            tracing::info!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                items = self.items,
                depth = self.depth,
                "done"
            );
        }

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
