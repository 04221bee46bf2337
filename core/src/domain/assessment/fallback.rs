use crate::domain::{
    assessment::entities::{AnalysisReport, ClarifyingQuestion, QuestionSet},
    intake::entities::IntakeForm,
};

pub const IMPORTANT_NOTE: &str = "本分析基于中医理论，仅供健康参考。如有严重症状，请及时就医。";

pub const SYMPTOM_OPTIONS: [&str; 8] = [
    "头脑昏沉不清爽",
    "小腿容易水肿",
    "容易疲劳乏力",
    "睡眠质量差",
    "消化不良",
    "情绪波动大",
    "腰膝酸软",
    "手脚冰凉",
];

fn question(text: &str, options: &[&str], allow_multiple: bool) -> ClarifyingQuestion {
    ClarifyingQuestion {
        question_text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        allow_multiple,
    }
}

/// Questions used when the model response cannot be understood.
pub fn fallback_questions() -> QuestionSet {
    QuestionSet {
        questions: vec![
            question(
                "您最近的睡眠质量如何？",
                &["睡眠良好", "入睡困难", "易醒多梦", "早醒疲劳"],
                false,
            ),
            question(
                "您平时怕冷还是怕热？",
                &["怕冷", "怕热", "忽冷忽热", "无明显感觉"],
                false,
            ),
            question("您目前有哪些身体不适症状？（可多选）", &SYMPTOM_OPTIONS, true),
        ],
    }
}

/// Generic report built only from what the user entered.
pub fn fallback_report(intake: &IntakeForm) -> AnalysisReport {
    let visual = if intake.image_url.is_some() {
        "图像分析遇到技术问题，基于用户描述进行分析"
    } else {
        "基于用户提供的舌诊信息进行分析"
    };

    AnalysisReport {
        visual_features: vec![visual.to_string()],
        tcm_patterns: vec!["需要进一步面诊确定具体证型".to_string()],
        holistic_analysis: format!(
            "根据您提供的信息：身高{}cm，体重{}kg，舌质{}，舌体{}，舌苔{}且{}。建议寻求专业中医师面诊以获得更准确的分析。",
            intake.height_cm,
            intake.weight_kg,
            intake.tongue_body_color,
            intake.tongue_shape,
            intake.tongue_coating_color,
            intake.tongue_coating_thickness,
        ),
        dietary_suggestions: vec![
            "均衡饮食，避免过于寒凉或燥热的食物".to_string(),
            "定时定量进餐，避免暴饮暴食".to_string(),
            "多喝温开水，保持身体水分平衡".to_string(),
        ],
        lifestyle_suggestions: vec![
            "保持规律作息，早睡早起".to_string(),
            "适量运动，如散步、太极等温和运动".to_string(),
            "保持心情愉悦，避免过度劳累".to_string(),
        ],
        important_note: IMPORTANT_NOTE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::value_objects::RawIntake;

    fn intake(image_url: Option<&str>) -> IntakeForm {
        IntakeForm::new(RawIntake {
            height: 165.0,
            weight: 55.5,
            tongue_body_color: "淡红色".to_string(),
            tongue_shape: "齿痕".to_string(),
            tongue_coating_color: "白苔".to_string(),
            tongue_coating_thickness: "腻苔".to_string(),
            image_url: image_url.map(str::to_string),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn fallback_questions_end_with_multi_select_symptoms() {
        let set = fallback_questions();
        assert_eq!(set.questions.len(), 3);
        assert!(set.questions[..2].iter().all(|q| !q.allow_multiple));
        assert!(set.questions[2].allow_multiple);
        assert_eq!(set.questions[2].options.len(), 8);
    }

    #[test]
    fn fallback_report_restates_intake() {
        let report = fallback_report(&intake(None));
        assert_eq!(
            report.holistic_analysis,
            "根据您提供的信息：身高165cm，体重55.5kg，舌质淡红色，舌体齿痕，舌苔白苔且腻苔。建议寻求专业中医师面诊以获得更准确的分析。"
        );
        assert_eq!(report.visual_features, vec!["基于用户提供的舌诊信息进行分析"]);
        assert_eq!(report.important_note, IMPORTANT_NOTE);
    }

    #[test]
    fn fallback_report_mentions_image_problem_when_image_given() {
        let report = fallback_report(&intake(Some("https://cdn.example.com/t.jpg")));
        assert_eq!(
            report.visual_features,
            vec!["图像分析遇到技术问题，基于用户描述进行分析"]
        );
    }
}
