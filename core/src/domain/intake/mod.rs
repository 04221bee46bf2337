pub mod bmi;
pub mod entities;
pub mod questionnaire;
pub mod value_objects;

pub use bmi::*;
pub use entities::*;
pub use value_objects::*;
