//! Profile analysis webhook client.
//!
//! Sends the user's academic profile together with the current search
//! results to an external analysis service and returns its feedback as
//! displayable text. Every failure is an [`AnalysisError`] for the caller
//! to show as a warning; search state is never touched.

use std::time::Duration;

use scholar_search::SearchResult;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;

/// Longest slice of an error body kept in [`AnalysisError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// The user's academic background.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// GPA or grades, free text ("3.7 / 4.0", "85%").
    pub gpa: String,
    /// Current degree / major.
    pub major: String,
    /// Key skills or courses.
    pub skills: String,
    /// Achievements, projects, internships.
    pub projects: String,
    /// Goals, region preference, anything else.
    pub details: String,
}

impl Profile {
    /// GPA and major are required; everything else is optional.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.gpa.trim().is_empty() || self.major.trim().is_empty() {
            return Err(AnalysisError::Validation(
                "please fill in at least your GPA and major".into(),
            ));
        }
        Ok(())
    }
}

/// Wire body. Field names are the ones the deployed webhook expects.
#[derive(Debug, Serialize)]
struct AnalysisRequest<'a> {
    user_profile: &'a Profile,
    search_results: &'a [SearchResult],
}

/// Errors from the analysis boundary.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The profile is missing required fields.
    #[error("invalid profile: {0}")]
    Validation(String),

    /// No webhook URL is configured.
    #[error("analysis webhook is not configured")]
    NotConfigured,

    /// The service did not answer in time.
    #[error("analysis timed out after {0}s")]
    Timeout(u64),

    /// The service answered with a non-200 status.
    #[error("analysis service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The request could not be sent or the body could not be read.
    #[error("analysis request failed: {0}")]
    Transport(String),

    /// The service answered 200 with nothing to show.
    #[error("analysis service returned an empty response")]
    EmptyResponse,
}

/// How the feedback text was obtained from the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// The `ai_feedback` field of a JSON object.
    AiFeedback,
    /// Some other JSON document, pretty-printed.
    Json,
    /// A non-JSON body.
    Text,
}

/// Displayable analysis result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub kind: FeedbackKind,
}

/// HTTP client for the analysis webhook.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    webhook_url: String,
    timeout_seconds: u64,
}

impl AnalysisClient {
    /// Build a client for the configured webhook.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NotConfigured`] if no webhook URL is set.
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        if config.webhook_url.trim().is_empty() {
            return Err(AnalysisError::NotConfigured);
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            webhook_url: config.webhook_url.trim().to_owned(),
            timeout_seconds: config.timeout_seconds.max(1),
        })
    }

    /// Submit `profile` and `results` for analysis. One request, no retries.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] on an invalid profile, timeout, non-200
    /// status, transport failure or empty body.
    pub async fn analyze(
        &self,
        profile: &Profile,
        results: &[SearchResult],
    ) -> Result<Feedback, AnalysisError> {
        profile.validate()?;
        tracing::info!(results = results.len(), "sending profile for analysis");

        let body = AnalysisRequest {
            user_profile: profile,
            search_results: results,
        };
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if status != reqwest::StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "analysis service rejected request");
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                body: text.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        decode_feedback(&text)
    }

    fn transport_error(&self, err: reqwest::Error) -> AnalysisError {
        // The webhook URL is a bearer secret.
        let err = err.without_url();
        if err.is_timeout() {
            tracing::warn!(timeout = self.timeout_seconds, "analysis request timed out");
            AnalysisError::Timeout(self.timeout_seconds)
        } else {
            tracing::warn!(error = %err, "analysis request failed");
            AnalysisError::Transport(err.to_string())
        }
    }
}

/// Turn a 200 response body into displayable feedback.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyResponse`] if there is nothing to show.
pub fn decode_feedback(body: &str) -> Result<Feedback, AnalysisError> {
    let feedback = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(mut map)) if map.contains_key("ai_feedback") => {
            let text = match map.remove("ai_feedback") {
                Some(serde_json::Value::String(s)) => s,
                Some(serde_json::Value::Null) | None => String::new(),
                Some(other) => pretty(&other),
            };
            Feedback {
                text: text.trim().to_owned(),
                kind: FeedbackKind::AiFeedback,
            }
        }
        Ok(value) => Feedback {
            text: pretty(&value),
            kind: FeedbackKind::Json,
        },
        Err(_) => Feedback {
            text: body.trim().to_owned(),
            kind: FeedbackKind::Text,
        },
    };

    if feedback.text.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    Ok(feedback)
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn profile() -> Profile {
        Profile {
            gpa: "3.7 / 4.0".into(),
            major: "Computer Science".into(),
            ..Default::default()
        }
    }

    #[test]
    fn gpa_and_major_required() {
        assert!(profile().validate().is_ok());

        let missing_gpa = Profile {
            gpa: " ".into(),
            ..profile()
        };
        assert!(matches!(
            missing_gpa.validate(),
            Err(AnalysisError::Validation(_))
        ));

        let missing_major = Profile {
            major: String::new(),
            ..profile()
        };
        assert!(missing_major.validate().is_err());
    }

    #[test]
    fn request_body_uses_webhook_field_names() {
        let p = profile();
        let body = serde_json::to_value(AnalysisRequest {
            user_profile: &p,
            search_results: &[],
        })
        .unwrap();
        assert_eq!(body["user_profile"]["gpa"], "3.7 / 4.0");
        assert_eq!(body["user_profile"]["details"], "");
        assert!(body["search_results"].as_array().unwrap().is_empty());
    }

    #[test]
    fn ai_feedback_field_extracted() {
        let fb = decode_feedback(r#"{"ai_feedback": "Apply to MIT.", "other": 1}"#).unwrap();
        assert_eq!(fb.text, "Apply to MIT.");
        assert_eq!(fb.kind, FeedbackKind::AiFeedback);
    }

    #[test]
    fn other_json_pretty_printed() {
        let fb = decode_feedback(r#"{"score":7}"#).unwrap();
        assert_eq!(fb.text, "{\n  \"score\": 7\n}");
        assert_eq!(fb.kind, FeedbackKind::Json);
    }

    #[test]
    fn structured_ai_feedback_pretty_printed() {
        let fb = decode_feedback(r#"{"ai_feedback": {"fit": "good"}}"#).unwrap();
        assert_eq!(fb.text, "{\n  \"fit\": \"good\"\n}");
        assert_eq!(fb.kind, FeedbackKind::AiFeedback);
    }

    #[test]
    fn plain_text_trimmed() {
        let fb = decode_feedback("  Accepted\n").unwrap();
        assert_eq!(fb.text, "Accepted");
        assert_eq!(fb.kind, FeedbackKind::Text);
    }

    #[test]
    fn empty_bodies_rejected() {
        assert!(matches!(
            decode_feedback("   "),
            Err(AnalysisError::EmptyResponse)
        ));
        assert!(matches!(
            decode_feedback(r#"{"ai_feedback": ""}"#),
            Err(AnalysisError::EmptyResponse)
        ));
        assert!(matches!(
            decode_feedback(r#"{"ai_feedback": null}"#),
            Err(AnalysisError::EmptyResponse)
        ));
    }

    #[test]
    fn client_requires_webhook() {
        let err = AnalysisClient::new(&AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::NotConfigured));
    }
}
