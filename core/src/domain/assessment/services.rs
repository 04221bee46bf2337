use tracing::instrument;

use crate::domain::{
    assessment::{
        entities::InlineImage,
        fallback::{fallback_questions, fallback_report},
        parsing::{parse_analysis_report, parse_question_set},
        ports::{AssessmentService, ImageFetcher, LLMClient},
        prompts::{analysis_prompt, clarifying_questions_prompt},
        schema::{analysis_report_schema, question_set_schema},
        value_objects::{AnalysisOutcome, AnalyzeInput, QuestionSetOutcome},
    },
    common::{entities::app_errors::CoreError, services::Service},
    diagnostics::ports::DiagnosticsRepository,
    health::ports::HealthCheckRepository,
    intake::entities::IntakeForm,
    record::{entities::HealthRecord, ports::RecordRepository},
    storage::ports::ObjectStoragePort,
};

impl<RR, LLM, IF, OS, HC, DG> Service<RR, LLM, IF, OS, HC, DG>
where
    RR: RecordRepository,
    LLM: LLMClient,
    IF: ImageFetcher,
    OS: ObjectStoragePort,
    HC: HealthCheckRepository,
    DG: DiagnosticsRepository,
{
    /// A broken image link only costs the visual part of the analysis.
    async fn load_image(&self, intake: &IntakeForm) -> Option<InlineImage> {
        let url = intake.image_url.as_deref()?;

        match self.image_fetcher.fetch_image(url).await {
            Ok(image) => {
                tracing::debug!(url, mime_type = %image.mime_type, size = image.data.len(), "Fetched tongue image");
                Some(image)
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Failed to fetch tongue image, continuing without it");
                None
            }
        }
    }

    async fn ask_llm(
        &self,
        prompt: String,
        image: Option<InlineImage>,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        match image {
            Some(image) => {
                self.llm_client
                    .generate_with_image(prompt, image, response_schema)
                    .await
            }
            None => {
                self.llm_client
                    .generate_with_text(prompt, response_schema)
                    .await
            }
        }
    }
}

impl<RR, LLM, IF, OS, HC, DG> AssessmentService for Service<RR, LLM, IF, OS, HC, DG>
where
    RR: RecordRepository,
    LLM: LLMClient,
    IF: ImageFetcher,
    OS: ObjectStoragePort,
    HC: HealthCheckRepository,
    DG: DiagnosticsRepository,
{
    #[instrument(skip_all, fields(has_image = intake.image_url.is_some()))]
    async fn generate_questions(&self, intake: IntakeForm) -> Result<QuestionSetOutcome, CoreError> {
        let prompt = clarifying_questions_prompt(&intake);
        let image = self.load_image(&intake).await;

        let raw_response = self
            .ask_llm(prompt, image, question_set_schema())
            .await?;

        match parse_question_set(&raw_response) {
            Ok(set) => Ok(QuestionSetOutcome {
                questions: set.questions,
                fallback: false,
            }),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    raw_response = %raw_response,
                    "Unusable clarifying questions from LLM, using fallback set"
                );
                Ok(QuestionSetOutcome {
                    questions: fallback_questions().questions,
                    fallback: true,
                })
            }
        }
    }

    #[instrument(
        skip_all,
        fields(has_image = input.intake.image_url.is_some(), answers = input.answers.len())
    )]
    async fn analyze(&self, input: AnalyzeInput) -> Result<AnalysisOutcome, CoreError> {
        let prompt = analysis_prompt(
            &input.intake,
            input.questions.as_deref(),
            &input.answers,
        );
        let image = self.load_image(&input.intake).await;

        let raw_response = self
            .ask_llm(prompt, image, analysis_report_schema())
            .await?;

        let (report, fallback) = match parse_analysis_report(&raw_response) {
            Ok(report) => (report, false),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    raw_response = %raw_response,
                    "Unusable analysis from LLM, using fallback report"
                );
                (fallback_report(&input.intake), true)
            }
        };

        let record = HealthRecord::new(
            &input.intake,
            input.answers,
            report.clone(),
            fallback,
            input.device_id,
        );

        let record_id = match self.record_repository.create(record).await {
            Ok(record) => {
                tracing::info!(record_id = %record.id, fallback, "Health record saved");
                Some(record.id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save health record");
                None
            }
        };

        Ok(AnalysisOutcome {
            report,
            record_id,
            fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        assessment::{
            entities::{ClarifyingAnswer, ClarifyingAnswers},
            fallback::IMPORTANT_NOTE,
        },
        test_support::{
            InMemoryRecords, ScriptedLlm, StubImageFetcher, assessment_service, sample_intake,
        },
    };

    const QUESTIONS_JSON: &str = r#"{"questions": [
        {"questionText": "您是否经常口干？", "options": ["经常", "偶尔", "从不"], "allowMultiple": false},
        {"questionText": "您的大便情况如何？", "options": ["正常", "偏稀", "便秘"]},
        {"questionText": "您有哪些不适？", "options": ["乏力", "头晕"], "allowMultiple": true}
    ]}"#;

    const REPORT_JSON: &str = r#"```json
    {
      "visualFeatures": ["舌质淡红", "苔薄白"],
      "tcmPatterns": ["平和质"],
      "holisticAnalysis": "整体状态平稳",
      "dietarySuggestions": ["饮食清淡"],
      "lifestyleSuggestions": ["规律作息"],
      "importantNote": "仅供参考",
    }
    ```"#;

    fn answers() -> ClarifyingAnswers {
        let mut answers = ClarifyingAnswers::new();
        answers.insert(0, ClarifyingAnswer::Single("偶尔".to_string()));
        answers
    }

    #[tokio::test]
    async fn generate_questions_parses_model_output() {
        let llm = ScriptedLlm::replying(Ok(QUESTIONS_JSON));
        let service =
            assessment_service(InMemoryRecords::default(), llm.clone(), StubImageFetcher::default());

        let outcome = service.generate_questions(sample_intake(None)).await.unwrap();

        assert!(!outcome.fallback);
        assert_eq!(outcome.questions.len(), 3);
        assert!(outcome.questions[2].allow_multiple);
        assert!(llm.calls()[0].prompt.contains("Tongue Body Color: 淡红色"));
        assert!(llm.calls()[0].image.is_none());
    }

    #[tokio::test]
    async fn generate_questions_falls_back_on_prose() {
        let llm = ScriptedLlm::replying(Ok("抱歉，我无法回答。"));
        let service =
            assessment_service(InMemoryRecords::default(), llm, StubImageFetcher::default());

        let outcome = service.generate_questions(sample_intake(None)).await.unwrap();

        assert!(outcome.fallback);
        assert_eq!(outcome.questions, fallback_questions().questions);
    }

    #[tokio::test]
    async fn generate_questions_propagates_transport_errors() {
        let llm = ScriptedLlm::replying(Err(CoreError::ExternalServiceError(
            "Gemini API error: 503".to_string(),
        )));
        let service =
            assessment_service(InMemoryRecords::default(), llm, StubImageFetcher::default());

        let result = service.generate_questions(sample_intake(None)).await;
        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }

    #[tokio::test]
    async fn sends_fetched_image_inline() {
        let llm = ScriptedLlm::replying(Ok(QUESTIONS_JSON));
        let service = assessment_service(
            InMemoryRecords::default(),
            llm.clone(),
            StubImageFetcher::serving("image/png", b"png-bytes"),
        );

        service
            .generate_questions(sample_intake(Some("https://cdn.example.com/t.png")))
            .await
            .unwrap();

        let image = llm.calls()[0].image.clone().unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, b"png-bytes");
    }

    #[tokio::test]
    async fn image_fetch_failure_continues_with_text() {
        let llm = ScriptedLlm::replying(Ok(QUESTIONS_JSON));
        let service =
            assessment_service(InMemoryRecords::default(), llm.clone(), StubImageFetcher::default());

        let outcome = service
            .generate_questions(sample_intake(Some("https://cdn.example.com/missing.jpg")))
            .await
            .unwrap();

        assert!(!outcome.fallback);
        assert!(llm.calls()[0].image.is_none());
    }

    #[tokio::test]
    async fn analyze_saves_record_with_answers() {
        let records = InMemoryRecords::default();
        let llm = ScriptedLlm::replying(Ok(REPORT_JSON));
        let service = assessment_service(records.clone(), llm.clone(), StubImageFetcher::default());

        let outcome = service
            .analyze(AnalyzeInput {
                intake: sample_intake(None),
                questions: None,
                answers: answers(),
                device_id: Some("device-1".to_string()),
            })
            .await
            .unwrap();

        assert!(!outcome.fallback);
        assert_eq!(outcome.report.tcm_patterns, vec!["平和质"]);
        assert!(llm.calls()[0].prompt.contains("- Q1: 偶尔"));

        let saved = records.all();
        assert_eq!(saved.len(), 1);
        assert_eq!(Some(saved[0].id), outcome.record_id);
        assert_eq!(saved[0].device_id.as_deref(), Some("device-1"));
        assert_eq!(saved[0].tongue_body_color, "淡红色");
        assert_eq!(saved[0].clarifying_answers, answers());
    }

    #[tokio::test]
    async fn analyze_uses_fallback_report_on_missing_keys() {
        let records = InMemoryRecords::default();
        let llm = ScriptedLlm::replying(Ok(r#"{"visualFeatures": ["x"]}"#));
        let service = assessment_service(records.clone(), llm, StubImageFetcher::default());

        let outcome = service
            .analyze(AnalyzeInput {
                intake: sample_intake(None),
                questions: None,
                answers: ClarifyingAnswers::new(),
                device_id: None,
            })
            .await
            .unwrap();

        assert!(outcome.fallback);
        assert_eq!(outcome.report.important_note, IMPORTANT_NOTE);
        assert!(records.all()[0].is_fallback);
    }

    #[tokio::test]
    async fn analyze_survives_persistence_failure() {
        let llm = ScriptedLlm::replying(Ok(REPORT_JSON));
        let service =
            assessment_service(InMemoryRecords::failing_writes(), llm, StubImageFetcher::default());

        let outcome = service
            .analyze(AnalyzeInput {
                intake: sample_intake(None),
                questions: None,
                answers: answers(),
                device_id: None,
            })
            .await
            .unwrap();

        assert!(!outcome.fallback);
        assert_eq!(outcome.record_id, None);
    }
}
