use hypr_highlight_interface::SentimentScores;
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Serialize)]
pub struct ClassifyRequest<'a> {
    pub inputs: &'a str,
    pub options: ClassifyOptions,
}

#[derive(Debug, Serialize)]
pub struct ClassifyOptions {
    pub wait_for_model: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// The API answers `[[{label, score}, ...]]` for a single input; some
/// deployments drop the outer list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClassifyResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassifyResponse {
    pub fn into_labels(self) -> Vec<LabelScore> {
        match self {
            ClassifyResponse::Nested(mut outer) => {
                if outer.is_empty() {
                    Vec::new()
                } else {
                    outer.swap_remove(0)
                }
            }
            ClassifyResponse::Flat(labels) => labels,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: String,
}

pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .map(|resp| resp.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Map model labels onto the three classes and normalize. Accepts the
/// `LABEL_0/1/2` names of the cardiffnlp models as well as plain
/// `negative`/`neutral`/`positive`, in any case. Other labels are ignored.
pub fn to_scores(labels: &[LabelScore]) -> Result<SentimentScores, Error> {
    let mut scores = SentimentScores::default();
    let mut matched = false;

    for entry in labels {
        let slot = match entry.label.to_ascii_lowercase().as_str() {
            "label_0" | "negative" | "neg" => &mut scores.negative,
            "label_1" | "neutral" | "neu" => &mut scores.neutral,
            "label_2" | "positive" | "pos" => &mut scores.positive,
            _ => continue,
        };
        *slot = entry.score;
        matched = true;
    }

    if !matched {
        return Err(Error::UnknownLabels(
            labels.iter().map(|l| l.label.clone()).collect(),
        ));
    }
    Ok(scores.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn label(label: &str, score: f32) -> LabelScore {
        LabelScore {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn numbered_labels() {
        let scores = to_scores(&[label("LABEL_2", 0.7), label("LABEL_1", 0.2), label("LABEL_0", 0.1)]).unwrap();
        assert_abs_diff_eq!(scores.positive, 0.7, epsilon = 1e-6);
        assert_abs_diff_eq!(scores.neutral, 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(scores.negative, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn named_labels_are_renormalized() {
        let scores = to_scores(&[label("Negative", 1.0), label("NEUTRAL", 1.0), label("other", 5.0)]).unwrap();
        assert_abs_diff_eq!(scores.negative, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(scores.neutral, 0.5, epsilon = 1e-6);
        assert_eq!(scores.positive, 0.0);
    }

    #[test]
    fn unknown_labels_fail() {
        assert!(matches!(
            to_scores(&[label("joy", 0.9)]),
            Err(Error::UnknownLabels(labels)) if labels == vec!["joy".to_string()]
        ));
    }

    #[test]
    fn response_shapes() {
        let nested: ClassifyResponse =
            serde_json::from_str(r#"[[{"label":"LABEL_1","score":0.9}]]"#).unwrap();
        let flat: ClassifyResponse =
            serde_json::from_str(r#"[{"label":"LABEL_1","score":0.9}]"#).unwrap();

        assert_eq!(nested.into_labels(), vec![label("LABEL_1", 0.9)]);
        assert_eq!(flat.into_labels(), vec![label("LABEL_1", 0.9)]);
    }
}
