//! 请求间隔限制
//!
//! AI 接口按最小间隔限流：两次请求的起始时刻至少相隔配置的秒数，
//! 不足则补足等待。这只是简单的本地限流，不是令牌桶。

use std::time::{Duration, Instant};

use tracing::debug;

pub(crate) struct RequestInterval {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RequestInterval {
    pub(crate) fn new(min_interval_secs: u64) -> Self {
        Self {
            min_interval: Duration::from_secs(min_interval_secs),
            last_request: None,
        }
    }

    /// 距离下一次允许请求还需等待的时长
    fn remaining(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request?;
        let elapsed = now.duration_since(last);
        if elapsed < self.min_interval {
            Some(self.min_interval - elapsed)
        } else {
            None
        }
    }

    /// 必要时等待，然后记录本次请求的起始时间
    pub(crate) async fn throttle(&mut self) {
        if let Some(wait) = self.remaining(Instant::now()) {
            debug!("API请求间隔过短, 等待 {:.1} 秒", wait.as_secs_f64());
            tokio::time::sleep(wait).await;
        }
        self.last_request = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_not_delayed() {
        let interval = RequestInterval::new(3);
        assert_eq!(interval.remaining(Instant::now()), None);
    }

    #[test]
    fn test_remaining_delta() {
        let mut interval = RequestInterval::new(3);
        let start = Instant::now();
        interval.last_request = Some(start);

        let half_second_later = start + Duration::from_millis(500);
        let wait = interval.remaining(half_second_later).unwrap();
        assert_eq!(wait, Duration::from_millis(2500));

        let long_after = start + Duration::from_secs(4);
        assert_eq!(interval.remaining(long_after), None);
    }

    #[tokio::test]
    async fn test_throttle_enforces_interval() {
        let mut interval = RequestInterval::new(1);
        interval.throttle().await;
        let first = Instant::now();
        interval.throttle().await;
        // 两次请求起始时刻至少相隔一个最小间隔
        assert!(first.elapsed() >= Duration::from_secs(1));
    }
}
