//! Configuration of one pipeline run.

use std::path::PathBuf;

use basket_ingest::LoadOptions;
use basket_model::CleaningConfig;

/// Input directory used when none is given.
pub const DEFAULT_INPUT_DIR: &str = "data/raw";

/// Input directory of the bundled sample dataset.
pub const SAMPLE_INPUT_DIR: &str = "data/raw_sample";

/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "data/clean";

/// Directories and options of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineContext {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub load_options: LoadOptions,
    /// When set, aisles, departments and products are cleaned before merging.
    pub input_cleaning: Option<CleaningConfig>,
}

impl PipelineContext {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            load_options: LoadOptions::default(),
            input_cleaning: None,
        }
    }

    pub fn with_load_options(mut self, load_options: LoadOptions) -> Self {
        self.load_options = load_options;
        self
    }

    /// Sets the order row cap. `None` loads every order.
    pub fn with_order_row_cap(mut self, cap: Option<usize>) -> Self {
        self.load_options = self.load_options.with_order_row_cap(cap);
        self
    }

    pub fn with_input_cleaning(mut self, config: CleaningConfig) -> Self {
        self.input_cleaning = Some(config);
        self
    }
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR)
    }
}
