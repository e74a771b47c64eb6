//! Transcript analysis: validate input, ask the model once, extract and coerce its answer.

use crate::error::Error;
use log::*;
use meeting_ai::{AnalysisResult, CompletionClient, CompletionRequest};
use std::sync::Arc;

/// Transcripts shorter than this (after trimming) are rejected before any model call.
pub const MIN_TRANSCRIPT_CHARS: usize = 10;

/// Fixed instruction sent as the system prompt of every analysis request.
pub const SYSTEM_PROMPT: &str = r#"You are a meeting analysis assistant. Analyze the provided meeting transcript and extract the following information in JSON format:

1. **summary**: A list of bullet points summarizing the key discussion points
2. **tasks**: A list of action items with:
   - owner: Person responsible for the task
   - task: Description of what needs to be done
   - deadline: When it's due (if mentioned, otherwise null)
   - priority: High, Medium, or Low
3. **next_meeting_date**: When the next meeting is scheduled (if mentioned, otherwise null)

Return ONLY a valid JSON object with these exact keys. No markdown, no extra text. The output must be parseable JSON."#;

/// Orchestrates a single transcript analysis against a completion provider.
///
/// Built once at startup and shared read-only between requests.
pub struct Analyzer {
    client: Arc<dyn CompletionClient>,
}

impl Analyzer {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub fn provider_id(&self) -> &str {
        self.client.provider_id()
    }

    /// Analyze a meeting transcript.
    ///
    /// Rejects empty or too-short transcripts without contacting the provider, then
    /// issues exactly one completion request and turns its first text block into an
    /// [`AnalysisResult`]. No partial result is returned on failure.
    pub async fn analyze(&self, transcript: &str) -> Result<AnalysisResult, Error> {
        validate_transcript(transcript)?;

        let request = CompletionRequest::new(
            SYSTEM_PROMPT,
            format!("Please analyze this meeting transcript:\n\n{transcript}"),
        );

        debug!(
            "Requesting analysis from {} for a {} character transcript",
            self.client.provider_id(),
            transcript.chars().count()
        );
        let completion = self.client.complete(request).await?;

        let text = completion
            .first_text()
            .ok_or(meeting_ai::Error::EmptyResponse)?;
        let object = meeting_ai::extract_json_object(text)?;
        let result = AnalysisResult::from_extracted(&object)?;

        info!(
            "Analysis complete: {} summary point(s), {} task(s)",
            result.summary.len(),
            result.tasks.len()
        );
        Ok(result)
    }
}

fn validate_transcript(transcript: &str) -> Result<(), Error> {
    let trimmed = transcript.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_input("Transcript text cannot be empty"));
    }
    if trimmed.chars().count() < MIN_TRANSCRIPT_CHARS {
        return Err(Error::invalid_input(format!(
            "Transcript must be at least {MIN_TRANSCRIPT_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, ExternalErrorKind, InternalErrorKind};
    use meeting_ai::traits::completion::MockCompletionClient;
    use meeting_ai::{Completion, ContentBlock, Priority};

    const TRANSCRIPT: &str =
        "Ann: Let's ship the beta on Friday. Bob: I'll write the release notes by Thursday.";

    fn analyzer_with(mock: MockCompletionClient) -> Analyzer {
        Analyzer::new(Arc::new(mock))
    }

    fn mock_never_called() -> MockCompletionClient {
        let mut mock = MockCompletionClient::new();
        mock.expect_complete().times(0);
        mock.expect_provider_id().return_const("mock".to_string());
        mock
    }

    fn mock_returning(
        result: Result<Completion, meeting_ai::Error>,
    ) -> MockCompletionClient {
        let mut mock = MockCompletionClient::new();
        mock.expect_complete()
            .withf(|request| {
                request.system == SYSTEM_PROMPT && request.user_message.ends_with(TRANSCRIPT)
            })
            .times(1)
            .return_once(move |_| result);
        mock.expect_provider_id().return_const("mock".to_string());
        mock
    }

    #[tokio::test]
    async fn empty_transcript_is_rejected_without_calling_the_model() {
        let analyzer = analyzer_with(mock_never_called());

        for transcript in ["", "   \n  "] {
            let err = analyzer.analyze(transcript).await.unwrap_err();
            assert_eq!(
                err.error_kind,
                DomainErrorKind::Internal(InternalErrorKind::InvalidInput(
                    "Transcript text cannot be empty".to_string()
                ))
            );
        }
    }

    #[tokio::test]
    async fn short_transcript_is_rejected_without_calling_the_model() {
        let analyzer = analyzer_with(mock_never_called());

        let err = analyzer.analyze("short").await.unwrap_err();
        assert!(matches!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::InvalidInput(_))
        ));

        // Surrounding whitespace does not count towards the minimum length.
        let err = analyzer.analyze("   short     ").await.unwrap_err();
        assert!(matches!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn fenced_model_output_is_extracted_and_coerced() {
        let text = "Here you go:\n```json\n{\"summary\": \"Beta ships Friday\", \"tasks\": [{\"owner\": \"Bob\", \"task\": \"Write release notes\", \"deadline\": \"Thursday\", \"priority\": \"High\"}, {\"owner\": \"Ann\"}], \"next_meeting_date\": null}\n```";
        let analyzer = analyzer_with(mock_returning(Ok(Completion::from_text(text))));

        let result = analyzer.analyze(TRANSCRIPT).await.unwrap();

        assert_eq!(result.summary, vec!["Beta ships Friday".to_string()]);
        assert_eq!(result.tasks.len(), 1);
        assert_eq!(result.tasks[0].owner, "Bob");
        assert_eq!(result.tasks[0].deadline.as_deref(), Some("Thursday"));
        assert_eq!(result.tasks[0].priority, Priority::High);
        assert_eq!(result.next_meeting_date, None);
    }

    #[tokio::test]
    async fn first_text_block_is_used() {
        let completion = Completion {
            content: vec![
                ContentBlock::Other {
                    kind: "thinking".to_string(),
                },
                ContentBlock::Text {
                    text: r#"{"summary": ["one"], "tasks": []}"#.to_string(),
                },
                ContentBlock::Text {
                    text: r#"{"summary": ["two"], "tasks": []}"#.to_string(),
                },
            ],
        };
        let analyzer = analyzer_with(mock_returning(Ok(completion)));

        let result = analyzer.analyze(TRANSCRIPT).await.unwrap();
        assert_eq!(result.summary, vec!["one".to_string()]);
    }

    #[tokio::test]
    async fn completion_without_text_is_an_analysis_error() {
        let analyzer = analyzer_with(mock_returning(Ok(Completion::default())));

        let err = analyzer.analyze(TRANSCRIPT).await.unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Analysis(
                "Empty response from model".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn prose_without_json_is_an_analysis_error() {
        let analyzer = analyzer_with(mock_returning(Ok(Completion::from_text(
            "I'm sorry, I can't help with that.",
        ))));

        let err = analyzer.analyze(TRANSCRIPT).await.unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Analysis(
                "No JSON object found in response".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn missing_tasks_key_is_an_analysis_error() {
        let analyzer = analyzer_with(mock_returning(Ok(Completion::from_text(
            r#"{"summary": ["only a summary"]}"#,
        ))));

        let err = analyzer.analyze(TRANSCRIPT).await.unwrap_err();
        assert!(matches!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Analysis(msg)) if msg.contains("tasks")
        ));
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_upstream_error() {
        let analyzer = analyzer_with(mock_returning(Err(meeting_ai::Error::Provider(
            "500 Internal Server Error: boom".to_string(),
        ))));

        let err = analyzer.analyze(TRANSCRIPT).await.unwrap_err();
        assert!(matches!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Upstream(_))
        ));
    }
}
