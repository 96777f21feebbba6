//! Joins lookup outcomes into the final report.

use docscout_core::{AnalysisResult, FailurePolicy, LookupOutcome, LookupStatus};

/// Build the report, keeping extraction order.
///
/// Every entry is headed by the exact command that produced it. Failed
/// lookups are annotated or dropped according to `policy`. When no lookup
/// succeeded the result is [`AnalysisResult::NothingFound`], carrying the
/// annotated failures under [`FailurePolicy::Annotate`].
pub fn aggregate(outcomes: &[LookupOutcome], policy: FailurePolicy) -> AnalysisResult {
    let any_success = outcomes.iter().any(LookupOutcome::is_success);

    let entries: Vec<String> = outcomes
        .iter()
        .filter_map(|outcome| render(outcome, policy))
        .collect();

    if any_success {
        AnalysisResult::Documentation(entries.join("\n\n"))
    } else if entries.is_empty() {
        AnalysisResult::nothing_found()
    } else {
        AnalysisResult::NothingFound {
            failures: Some(entries.join("\n\n")),
        }
    }
}

fn render(outcome: &LookupOutcome, policy: FailurePolicy) -> Option<String> {
    match (&outcome.status, policy) {
        (LookupStatus::Success(text), _) => Some(format!("### {}\n{}", outcome.command, text)),
        (LookupStatus::Failure(error), FailurePolicy::Annotate) => {
            Some(format!("### {}\nerror: {}", outcome.command, error))
        }
        (LookupStatus::Failure(_), FailurePolicy::Drop) => None,
    }
}
