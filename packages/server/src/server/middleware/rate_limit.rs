// Rate limiting using tower-governor
//
// Configuration:
// - RATE_LIMIT_REQUESTS per RATE_LIMIT_PERIOD seconds per client IP
//   (100 per 60s by default), expressed to governor as a replenish interval
//   plus a burst equal to the full allowance
// - Client IP comes from X-Forwarded-For / X-Real-IP, then the socket address
//
// Applied in app.rs to the whole router when enabled.

/// Milliseconds between replenished requests for `requests` per `period_secs`.
pub fn replenish_interval_ms(requests: u32, period_secs: u64) -> u64 {
    let requests = u64::from(requests.max(1));
    (period_secs.saturating_mul(1000) / requests).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allowance() {
        // 100 requests per minute -> one every 600ms
        assert_eq!(replenish_interval_ms(100, 60), 600);
    }

    #[test]
    fn test_degenerate_values_are_clamped() {
        assert_eq!(replenish_interval_ms(0, 60), 60_000);
        assert_eq!(replenish_interval_ms(5000, 1), 1);
        assert_eq!(replenish_interval_ms(10, 0), 1);
    }
}
