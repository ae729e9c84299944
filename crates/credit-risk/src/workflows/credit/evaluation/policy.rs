use super::super::domain::Verdict;

/// Closed lower bound: a probability equal to the threshold is rejected.
pub(crate) fn decide_verdict(default_probability: f64, threshold: f64) -> Verdict {
    if default_probability >= threshold {
        Verdict::Rejected
    } else {
        Verdict::Approved
    }
}
