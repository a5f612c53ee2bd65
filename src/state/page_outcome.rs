use std::fmt;

/// What happened to one candidate URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    /// Page qualified and a record was produced
    Recorded,

    /// Network error, timeout or non-2xx status
    FetchFailed,

    /// Score fell under the qualification threshold
    BelowThreshold { score: u32 },

    /// Page qualified but no catalog model appears in it
    NoModel,
}

impl PageOutcome {
    /// Returns true if the page produced a record
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded)
    }

    /// Returns true if the page was skipped for any reason
    pub fn is_skipped(&self) -> bool {
        !self.is_recorded()
    }

    /// Short label used in logs and summaries
    pub fn label(&self) -> &'static str {
        match self {
            Self::Recorded => "recorded",
            Self::FetchFailed => "fetch_failed",
            Self::BelowThreshold { .. } => "below_threshold",
            Self::NoModel => "no_model",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowThreshold { score } => write!(f, "{} ({})", self.label(), score),
            _ => write!(f, "{}", self.label()),
        }
    }
}

/// Tally of outcomes over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub recorded: u64,
    pub fetch_failed: u64,
    pub below_threshold: u64,
    pub no_model: u64,
}

impl OutcomeCounts {
    pub fn add(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Recorded => self.recorded += 1,
            PageOutcome::FetchFailed => self.fetch_failed += 1,
            PageOutcome::BelowThreshold { .. } => self.below_threshold += 1,
            PageOutcome::NoModel => self.no_model += 1,
        }
    }

    /// Total number of pages processed
    pub fn total(&self) -> u64 {
        self.recorded + self.fetch_failed + self.below_threshold + self.no_model
    }

    /// Share of processed pages that produced a record, as a percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.recorded as f64 / total as f64) * 100.0
    }
}
