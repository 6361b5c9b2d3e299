//! Limit/offset normalization.

use ride_journal_sdk::{PageRequest, DEFAULT_PAGE_LIMIT};

/// Bounds applied to every list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitCfg {
    pub default: u64,
    pub max: u64,
}

impl Default for LimitCfg {
    fn default() -> Self {
        Self {
            default: DEFAULT_PAGE_LIMIT,
            max: 100,
        }
    }
}

/// Largest value a SQL `LIMIT`/`OFFSET` bind accepts.
const SQL_BOUND: u64 = i64::MAX.unsigned_abs();

/// A normalized page window handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: u64,
    pub offset: u64,
}

impl LimitCfg {
    /// Missing limit becomes `default`, oversized limits are clamped to `max`,
    /// missing offset becomes 0. Both stay within the signed 64-bit range the
    /// store binds them as.
    #[must_use]
    pub fn window(&self, page: &PageRequest) -> PageWindow {
        let max = self.max.clamp(1, SQL_BOUND);
        let limit = page.limit.unwrap_or(self.default).min(max);
        PageWindow {
            limit,
            offset: page.offset.unwrap_or(0).min(SQL_BOUND),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let w = LimitCfg::default().window(&PageRequest::default());
        assert_eq!(w, PageWindow { limit: 10, offset: 0 });
    }

    #[test]
    fn explicit_values_pass_through() {
        let w = LimitCfg::default().window(&PageRequest::new(2, 4));
        assert_eq!(w, PageWindow { limit: 2, offset: 4 });
    }

    #[test]
    fn oversized_limit_is_clamped() {
        let cfg = LimitCfg { default: 10, max: 50 };
        let w = cfg.window(&PageRequest::new(10_000, 0));
        assert_eq!(w.limit, 50);
    }

    #[test]
    fn offsets_beyond_sql_range_are_clamped() {
        let w = LimitCfg::default().window(&PageRequest::new(5, u64::MAX));
        assert_eq!(w.offset, SQL_BOUND);

        let cfg = LimitCfg {
            default: u64::MAX,
            max: u64::MAX,
        };
        assert_eq!(cfg.window(&PageRequest::default()).limit, SQL_BOUND);
    }

    #[test]
    fn zero_limit_is_kept() {
        let w = LimitCfg::default().window(&PageRequest::new(0, 0));
        assert_eq!(w.limit, 0);
    }
}
