pub mod dignities;
pub mod profection;
pub mod rulers;
pub mod signs;

pub use dignities::{dignity_of, exact_exaltation, Dignity, DignityScore, EXALTATION_ORB};
pub use profection::{house_theme, profect, profect_from, ProfectionResult};
pub use rulers::{domiciles, modern_ruler, traditional_ruler};
pub use signs::ZodiacSign;
