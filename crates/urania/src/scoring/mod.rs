pub mod luck;
pub mod severity;
pub mod significance;

pub use luck::{luck_score, VibeStatus};
pub use severity::{malefic_load, malefic_severity, MaleficSeverity};
pub use significance::{aspect_label, most_significant, significance, NO_MAJOR_ASPECT};
