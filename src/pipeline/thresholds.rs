use crate::domain::{LabelSet, TopicLabel, TopicProbabilities};

/// Inclusive cutoff for a category to be reported.
pub const LABEL_THRESHOLD: f64 = 0.30;

/// Every category at or above [`LABEL_THRESHOLD`]; if none qualifies, the
/// single most probable category. Ties resolve to the earliest category in
/// schema order, so the result is never empty.
pub fn assign_labels(probabilities: &TopicProbabilities) -> LabelSet {
    let labels: LabelSet = probabilities
        .iter()
        .filter(|(_, p)| *p >= LABEL_THRESHOLD)
        .map(|(label, _)| label)
        .collect();
    if !labels.is_empty() {
        return labels;
    }

    let (best, best_p) = probabilities
        .iter()
        .fold((TopicLabel::ALL[0], f64::NEG_INFINITY), |best, candidate| {
            if candidate.1 > best.1 { candidate } else { best }
        });
    tracing::debug!(
        target: "pipeline",
        label = %best,
        probability = best_p,
        "no category reached threshold; using top category"
    );
    [best].into_iter().collect()
}
