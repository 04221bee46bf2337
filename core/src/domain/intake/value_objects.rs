/// Unvalidated intake as submitted by a client. Tongue fields carry the
/// Chinese option labels shown in the questionnaire.
#[derive(Debug, Clone, Default)]
pub struct RawIntake {
    pub height: f64,
    pub weight: f64,
    pub tongue_body_color: String,
    pub tongue_shape: String,
    pub tongue_coating_color: String,
    pub tongue_coating_thickness: String,
    pub mood: Option<String>,
    pub symptoms: Option<String>,
    pub medical_records: Option<String>,
    pub image_url: Option<String>,
}
