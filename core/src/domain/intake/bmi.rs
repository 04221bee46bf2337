use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "偏瘦",
            BmiCategory::Normal => "正常",
            BmiCategory::Overweight => "超重",
            BmiCategory::Obese => "肥胖",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmi(f64);

impl Bmi {
    pub fn from_metrics(height_cm: f64, weight_kg: f64) -> Self {
        let height_m = height_cm / 100.0;
        Self(weight_kg / (height_m * height_m))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn category(&self) -> BmiCategory {
        match self.0 {
            v if v < 18.5 => BmiCategory::Underweight,
            v if v < 25.0 => BmiCategory::Normal,
            v if v < 30.0 => BmiCategory::Overweight,
            _ => BmiCategory::Obese,
        }
    }
}

impl std::fmt::Display for Bmi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_is_rounded_to_one_decimal() {
        let bmi = Bmi::from_metrics(165.0, 55.5);
        assert_eq!(bmi.to_string(), "20.4");
        assert_eq!(bmi.category(), BmiCategory::Normal);
    }

    #[test]
    fn bmi_category_boundaries() {
        assert_eq!(Bmi(18.49).category(), BmiCategory::Underweight);
        assert_eq!(Bmi(18.5).category(), BmiCategory::Normal);
        assert_eq!(Bmi(24.99).category(), BmiCategory::Normal);
        assert_eq!(Bmi(25.0).category(), BmiCategory::Overweight);
        assert_eq!(Bmi(30.0).category(), BmiCategory::Obese);
    }
}
