use std::fmt::Write as _;

use crate::domain::{
    assessment::{
        entities::{ClarifyingAnswers, ClarifyingQuestion},
        fallback::{IMPORTANT_NOTE, SYMPTOM_OPTIONS},
    },
    intake::entities::IntakeForm,
};

/// The "PATIENT DATA PROVIDED" block shared by both phases. Optional fields
/// are omitted entirely when the user left them blank.
pub fn patient_data_block(intake: &IntakeForm) -> String {
    let bmi = intake.bmi();
    let mut block = String::from("PATIENT DATA PROVIDED:\n");

    let _ = writeln!(block, "- Height: {} cm", intake.height_cm);
    let _ = writeln!(block, "- Weight: {} kg", intake.weight_kg);
    let _ = writeln!(block, "- BMI: {} ({})", bmi, bmi.category().label());
    if let Some(mood) = &intake.mood {
        let _ = writeln!(block, "- Current Mood: {mood}");
    }
    if let Some(symptoms) = &intake.symptoms {
        let _ = writeln!(block, "- Symptoms/Notes: {symptoms}");
    }
    let _ = writeln!(block, "- Tongue Body Color: {}", intake.tongue_body_color);
    let _ = writeln!(block, "- Tongue Shape: {}", intake.tongue_shape);
    let _ = writeln!(block, "- Tongue Coating Color: {}", intake.tongue_coating_color);
    let _ = writeln!(
        block,
        "- Tongue Coating Thickness: {}",
        intake.tongue_coating_thickness
    );
    if let Some(records) = &intake.medical_records {
        let _ = writeln!(block, "- Medical Records/Medication: {records}");
    }

    block
}

pub fn clarifying_questions_prompt(intake: &IntakeForm) -> String {
    let symptom_options = SYMPTOM_OPTIONS
        .iter()
        .map(|o| format!("\"{o}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are a Traditional Chinese Medicine (TCM) diagnostician with more than thirty years of clinical practice. Your only task is to read the intake data below and write clarifying multiple-choice questions that would sharpen your TCM pattern differentiation.

{data}
INSTRUCTIONS:
1. Form preliminary TCM impressions from the data above.
2. Decide which points most need clarification to tell similar patterns apart.
3. Write exactly 3 questions:
   - Question 1: single choice (allowMultiple: false)
   - Question 2: single choice (allowMultiple: false)
   - Question 3: multi-select symptom checklist (allowMultiple: true) with options such as "头脑昏沉不清爽", "小腿容易水肿"
4. Focus on symptoms, sensations or conditions that discriminate between patterns: sleep, digestion and appetite, cold/heat preference, emotions and stress, menstruation when relevant, urination and bowel habits, pain, seasonal changes.
5. Write the questions in plain Simplified Chinese.
6. Ground every question in this patient's tongue findings and data.

OUTPUT:
Return only a JSON object, with no markdown and no text outside it:

{{
  "questions": [
    {{"questionText": "基于患者舌诊特征的具体问题1", "options": ["选项1", "选项2", "选项3", "选项4"], "allowMultiple": false}},
    {{"questionText": "基于患者整体状况的具体问题2", "options": ["选项1", "选项2", "选项3"], "allowMultiple": false}},
    {{"questionText": "您目前有哪些身体不适症状？（可多选）", "options": [{symptom_options}], "allowMultiple": true}}
  ]
}}"#,
        data = patient_data_block(intake),
    )
}

/// Pairs each answer with its question when the questions are known,
/// otherwise lists answers by question number.
pub fn clarifying_answers_block(
    questions: Option<&[ClarifyingQuestion]>,
    answers: &ClarifyingAnswers,
) -> Option<String> {
    let answered: Vec<_> = answers.iter().filter(|(_, a)| !a.is_empty()).collect();
    if answered.is_empty() {
        return None;
    }

    let mut block = String::from("CLARIFYING ANSWERS:\n");
    for (index, answer) in answered {
        match questions.and_then(|qs| qs.get(*index)) {
            Some(question) => {
                let _ = writeln!(
                    block,
                    "- Q{}: {}\n  A: {}",
                    index + 1,
                    question.question_text,
                    answer.display()
                );
            }
            None => {
                let _ = writeln!(block, "- Q{}: {}", index + 1, answer.display());
            }
        }
    }

    Some(block)
}

pub fn analysis_prompt(
    intake: &IntakeForm,
    questions: Option<&[ClarifyingQuestion]>,
    answers: &ClarifyingAnswers,
) -> String {
    let answers_block = clarifying_answers_block(questions, answers)
        .map(|block| format!("\n{block}"))
        .unwrap_or_default();

    format!(
        r#"You are a senior health consultant trained in every major school of Traditional Chinese Medicine (TCM) and in modern medicine. You read tongue findings closely and combine TCM and Western knowledge to help people manage their health.

ANALYZE ONLY THE DATA BELOW.

{data}{answers}
RULES:
- Never invent or assume data that was not provided (mood, symptoms, history or anything else).
- Never reference information absent from the data above.
- If something is missing, say so and work with what is available.
- Base conclusions on the tongue characteristics, measurements and answers given.

METHOD:
1. Visual assessment. With an attached tongue image: describe color and its regional variation, texture, moisture, cracks, papillae, coating distribution and thickness, edges (scalloping, teeth marks) and size. Without an image: use the selected tongue characteristics and state the limitation.
2. TCM pattern differentiation: eight principles (yin/yang, interior/exterior, cold/heat, deficiency/excess), zang-fu, qi-blood-fluids, meridians and constitution types. Name patterns with standard terminology such as 气虚证, 血瘀证, 痰湿证, 阴虚证, 阳虚证, 湿热证, including combined patterns.
3. Integrative reading: relate the findings to metabolism, circulation, digestion, immunity, stress response, hormonal balance and nutrition.
   BMI guide: below 18.5 consider qi/yang deficiency; 18.5 to 24.9 focus on optimizing constitution; 25 to 29.9 assess phlegm-dampness; 30 and above evaluate complex patterns with spleen dysfunction.
4. Recommendations: dietary therapy using food natures and flavors together with modern nutrition, and lifestyle advice on exercise, sleep, stress management and environment.

Stay professional, acknowledge the limits of a remote assessment, recommend an in-person consultation for concerning findings, and write everything in Simplified Chinese.

OUTPUT:
Return only a JSON object with exactly this structure, with no markdown and no text outside it:

{{
  "visualFeatures": ["基于提供数据的具体视觉特征描述1", "基于提供数据的具体视觉特征描述2", "基于提供数据的具体视觉特征描述3"],
  "tcmPatterns": ["基于分析确定的具体中医证候1", "基于分析确定的具体中医证候2"],
  "holisticAnalysis": "整合中西医理论的全面分析，说明舌诊发现与整体健康状态的关联，包括体质评估和健康风险提示",
  "dietarySuggestions": ["具体饮食建议1", "具体饮食建议2", "具体饮食建议3", "具体饮食建议4"],
  "lifestyleSuggestions": ["具体生活方式建议1", "具体生活方式建议2", "具体生活方式建议3", "具体生活方式建议4"],
  "importantNote": "{note}"
}}"#,
        data = patient_data_block(intake),
        answers = answers_block,
        note = IMPORTANT_NOTE,
    )
}
