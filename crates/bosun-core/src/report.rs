use std::collections::BTreeMap;

use crate::{CaseRecord, FailureReason};

/// End-of-run roll-up: totals plus a failure-reason histogram.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub by_reason: BTreeMap<FailureReason, usize>,
}

impl Summary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a CaseRecord>) -> Self {
        let mut s = Summary::default();
        for rec in records {
            s.total += 1;
            if rec.verdict.passed {
                s.passed += 1;
            } else {
                s.failed += 1;
                *s.by_reason.entry(rec.verdict.failure_reason).or_insert(0) += 1;
            }
        }
        s
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.passed as f64 * 100.0 / self.total as f64
    }

    /// Console rendering. Always includes the histogram section, even when
    /// nothing failed.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("== validation summary ==\n");
        out.push_str(&format!("total:     {}\n", self.total));
        out.push_str(&format!("passed:    {}\n", self.passed));
        out.push_str(&format!("failed:    {}\n", self.failed));
        out.push_str(&format!("pass rate: {:.1}%\n", self.pass_rate()));
        out.push_str("failures by reason:\n");
        if self.by_reason.is_empty() {
            out.push_str("  (none)\n");
        }
        for (reason, count) in &self.by_reason {
            out.push_str(&format!("  {:<20} {}\n", reason.as_str(), count));
        }
        out
    }
}
