pub mod calculator;
pub mod types;

pub use calculator::AspectCalculator;
pub use types::{
    Aspect, AspectCore, AspectError, AspectKind, AspectPhase, AspectTarget, ChartObject, OrbTable,
};
