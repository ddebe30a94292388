pub mod indicator;
pub mod markup;
mod timer;

pub use indicator::{AnimationState, DisplayTargets, Mode, ThinkingIndicator, INTERRUPT_MESSAGE};
pub use markup::Element;
