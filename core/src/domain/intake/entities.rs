use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError,
    intake::{bmi::Bmi, value_objects::RawIntake},
};

pub const MIN_HEIGHT_CM: f64 = 100.0;
pub const MAX_HEIGHT_CM: f64 = 250.0;
pub const MIN_WEIGHT_KG: f64 = 30.0;
pub const MAX_WEIGHT_KG: f64 = 200.0;

/// Declares a questionnaire option set whose wire value is the Chinese label.
macro_rules! option_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.label()).collect()
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label() == s)
                    .ok_or_else(|| {
                        CoreError::Invalid(format!(
                            "unknown {} option: {:?}",
                            stringify!($name),
                            s
                        ))
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

option_set!(
    /// 舌质颜色
    TongueBodyColor {
        PaleWhite => "淡白色",
        PaleRed => "淡红色",
        Red => "红色",
        Crimson => "深红色/绛色",
        BluePurple => "青紫色",
    }
);

option_set!(
    /// 舌体形态
    TongueShape {
        Normal => "正常",
        Swollen => "胖大",
        Thin => "瘦薄",
        Cracked => "裂纹",
        TeethMarked => "齿痕",
    }
);

option_set!(
    /// 舌苔颜色
    TongueCoatingColor {
        White => "白苔",
        Yellow => "黄苔",
        Gray => "灰苔",
        Black => "黑苔",
        Absent => "无苔",
    }
);

option_set!(
    /// 舌苔厚薄
    TongueCoatingThickness {
        Thin => "薄苔",
        Thick => "厚苔",
        Scant => "少苔",
        Greasy => "腻苔",
        Dry => "燥苔",
    }
);

/// Validated intake data shared by both assessment phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IntakeForm {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub tongue_body_color: TongueBodyColor,
    pub tongue_shape: TongueShape,
    pub tongue_coating_color: TongueCoatingColor,
    pub tongue_coating_thickness: TongueCoatingThickness,
    pub mood: Option<String>,
    pub symptoms: Option<String>,
    pub medical_records: Option<String>,
    pub image_url: Option<String>,
}

impl IntakeForm {
    pub fn new(raw: RawIntake) -> Result<Self, CoreError> {
        if !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&raw.height) {
            return Err(CoreError::Invalid(format!(
                "height must be between {MIN_HEIGHT_CM} and {MAX_HEIGHT_CM} cm"
            )));
        }

        if !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&raw.weight) {
            return Err(CoreError::Invalid(format!(
                "weight must be between {MIN_WEIGHT_KG} and {MAX_WEIGHT_KG} kg"
            )));
        }

        let image_url = non_blank(raw.image_url);
        if let Some(url) = &image_url {
            let parsed = reqwest::Url::parse(url)
                .map_err(|e| CoreError::Invalid(format!("invalid image url: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(CoreError::Invalid(
                    "image url must use http or https".to_string(),
                ));
            }
        }

        Ok(Self {
            height_cm: raw.height,
            weight_kg: raw.weight,
            tongue_body_color: raw.tongue_body_color.parse()?,
            tongue_shape: raw.tongue_shape.parse()?,
            tongue_coating_color: raw.tongue_coating_color.parse()?,
            tongue_coating_thickness: raw.tongue_coating_thickness.parse()?,
            mood: non_blank(raw.mood),
            symptoms: non_blank(raw.symptoms),
            medical_records: non_blank(raw.medical_records),
            image_url,
        })
    }

    pub fn bmi(&self) -> Bmi {
        Bmi::from_metrics(self.height_cm, self.weight_kg)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
