use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::intake::entities::{
    MAX_HEIGHT_CM, MAX_WEIGHT_KG, MIN_HEIGHT_CM, MIN_WEIGHT_KG, TongueBodyColor,
    TongueCoatingColor, TongueCoatingThickness, TongueShape,
};

pub const DEFAULT_HEIGHT_CM: f64 = 160.0;
pub const DEFAULT_WEIGHT_KG: f64 = 55.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    Welcome,
    BasicInfo {
        height: MetricRange,
        weight: MetricRange,
    },
    SingleChoice {
        key: String,
        question: String,
        options: Vec<String>,
    },
    ImageUpload {
        optional: bool,
    },
    Results,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuestionnaireStep {
    pub step: u8,
    #[serde(flatten)]
    pub kind: StepKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Questionnaire {
    pub total_steps: u8,
    pub steps: Vec<QuestionnaireStep>,
}

fn choice(step: u8, key: &str, question: &str, options: Vec<&'static str>) -> QuestionnaireStep {
    QuestionnaireStep {
        step,
        kind: StepKind::SingleChoice {
            key: key.to_string(),
            question: question.to_string(),
            options: options.into_iter().map(str::to_string).collect(),
        },
    }
}

/// Wizard shown before the clarifying-questions phase: welcome, basic
/// metrics, four tongue questions, optional photo, results.
pub fn questionnaire_steps() -> Questionnaire {
    let steps = vec![
        QuestionnaireStep {
            step: 1,
            kind: StepKind::Welcome,
        },
        QuestionnaireStep {
            step: 2,
            kind: StepKind::BasicInfo {
                height: MetricRange {
                    min: MIN_HEIGHT_CM,
                    max: MAX_HEIGHT_CM,
                    step: 0.1,
                    default: DEFAULT_HEIGHT_CM,
                    unit: "cm".to_string(),
                },
                weight: MetricRange {
                    min: MIN_WEIGHT_KG,
                    max: MAX_WEIGHT_KG,
                    step: 0.1,
                    default: DEFAULT_WEIGHT_KG,
                    unit: "kg".to_string(),
                },
            },
        },
        choice(
            3,
            "tongueBodyColor",
            "请选择您的舌质颜色",
            TongueBodyColor::labels(),
        ),
        choice(4, "tongueShape", "请选择您的舌体形态", TongueShape::labels()),
        choice(
            5,
            "tongueCoatingColor",
            "请选择您的舌苔颜色",
            TongueCoatingColor::labels(),
        ),
        choice(
            6,
            "tongueCoatingThickness",
            "请选择您的舌苔厚薄",
            TongueCoatingThickness::labels(),
        ),
        QuestionnaireStep {
            step: 7,
            kind: StepKind::ImageUpload { optional: true },
        },
        QuestionnaireStep {
            step: 8,
            kind: StepKind::Results,
        },
    ];

    Questionnaire {
        total_steps: steps.len() as u8,
        steps,
    }
}
