pub mod platform;
pub mod result;

pub use platform::Platform;
pub use result::{ExtractionResult, Field, FieldValue, PartialResult, UNKNOWN_NAME};
