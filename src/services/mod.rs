pub mod picker;
pub mod pointer;

pub use picker::PickerController;
pub use pointer::{PointerEvents, PointerMove, PointerSubscription};
