pub mod classifier;
pub mod render;
pub mod serialization;
pub mod staging;

mod traits;

pub use classifier::{JobInputBundle, JobSettings, classify_inputs};
pub use render::{RaspaInput, render_parameters};
pub use staging::{CalcInfo, PreparedJob, RaspaCalculation};
pub use traits::{InputRenderer, SubmissionPlugin};
