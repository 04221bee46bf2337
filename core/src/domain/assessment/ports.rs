use std::future::Future;

use crate::domain::{
    assessment::{
        entities::InlineImage,
        value_objects::{AnalysisOutcome, AnalyzeInput, QuestionSetOutcome},
    },
    common::entities::app_errors::CoreError,
    intake::entities::IntakeForm,
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image: InlineImage,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Downloads an image referenced by URL so it can be sent inline.
#[cfg_attr(test, mockall::automock)]
pub trait ImageFetcher: Send + Sync {
    fn fetch_image(&self, url: &str) -> impl Future<Output = Result<InlineImage, CoreError>> + Send;
}

/// Service trait for the two-phase assessment flow
pub trait AssessmentService: Send + Sync {
    fn generate_questions(
        &self,
        intake: IntakeForm,
    ) -> impl Future<Output = Result<QuestionSetOutcome, CoreError>> + Send;

    fn analyze(
        &self,
        input: AnalyzeInput,
    ) -> impl Future<Output = Result<AnalysisOutcome, CoreError>> + Send;
}
