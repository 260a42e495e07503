use crate::domain::{InputMap, PrepareResult};
use crate::modules::staging::model::CalcInfo;
use std::path::Path;

pub trait InputRenderer {
    fn render_lines(&self) -> Vec<String>;

    /// Lines joined with `\n`, without a trailing newline.
    fn render(&self) -> String {
        self.render_lines().join("\n")
    }
}

pub trait SubmissionPlugin {
    fn input_file_name(&self) -> &'static str;

    /// Validates `inputs`, writes the input file into `folder` and returns the
    /// staging descriptor. Nothing is written when validation fails.
    fn prepare_for_submission(&self, folder: &Path, inputs: InputMap) -> PrepareResult<CalcInfo>;
}

#[cfg(test)]
mod tests {
    use super::{InputRenderer, SubmissionPlugin};
    use crate::domain::{InputMap, PrepareResult, RaspaError, RaspaErrorCategory};
    use crate::modules::staging::model::CalcInfo;
    use std::path::Path;

    struct FixedRenderer;

    impl InputRenderer for FixedRenderer {
        fn render_lines(&self) -> Vec<String> {
            vec!["first".to_string(), "second".to_string()]
        }
    }

    struct RejectingPlugin;

    impl SubmissionPlugin for RejectingPlugin {
        fn input_file_name(&self) -> &'static str {
            "rejected.input"
        }

        fn prepare_for_submission(
            &self,
            _folder: &Path,
            _inputs: InputMap,
        ) -> PrepareResult<CalcInfo> {
            Err(RaspaError::input_validation(
                "INPUT.MISSING_PARAMETERS",
                "no parameters specified",
            ))
        }
    }

    #[test]
    fn default_render_joins_without_trailing_newline() {
        assert_eq!(FixedRenderer.render(), "first\nsecond");
    }

    #[test]
    fn plugins_use_shared_error_types() {
        let error = RejectingPlugin
            .prepare_for_submission(Path::new("."), InputMap::new())
            .expect_err("plugin should fail");
        assert_eq!(error.category(), RaspaErrorCategory::InputValidationError);
        assert_eq!(error.exit_code(), 2);
        assert_eq!(RejectingPlugin.input_file_name(), "rejected.input");
    }
}
