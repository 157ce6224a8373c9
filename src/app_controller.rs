use anyhow::{anyhow, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::format_detector;
use crate::subtitle_model::SubtitleFormat;
use crate::subtitle_processor::SubtitleDocument;

// @module: Application controller for file conversion

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Output written to the path
    Written(PathBuf),
    /// Output already existed and overwriting is off
    Skipped(PathBuf),
}

/// Main application controller for subtitle conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Detect the format of a file on disk
    pub async fn detect_file(&self, input_file: &Path) -> Result<SubtitleFormat> {
        let content = FileManager::read_to_string(input_file).await?;
        let filename = input_file.to_string_lossy();
        Ok(format_detector::detect_format(&filename, &content))
    }

    /// Convert one file into `target`, writing next to `output_dir`
    pub async fn convert_file(
        &self,
        input_file: &Path,
        output_dir: &Path,
        target: SubtitleFormat,
        force_overwrite: bool,
    ) -> Result<ConversionOutcome> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = FileManager::generate_output_path(
            input_file,
            output_dir,
            &self.config.output.file_suffix,
            target,
        );
        if output_path.exists() && !(force_overwrite || self.config.output.force_overwrite) {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_path);
            return Ok(ConversionOutcome::Skipped(output_path));
        }

        let content = FileManager::read_to_string(input_file).await?;
        let document = SubtitleDocument::from_file_content(&input_file.to_string_lossy(), &content);
        if document.cues.is_empty() {
            warn!("No cues found in {:?} (read as {})", input_file, document.format);
        }
        if target.is_word_timed() && !document.has_word_timing() {
            debug!("{:?} has no word timing, {} output will carry plain lines", input_file, target);
        }

        let output = document.to_format(target, self.config.output.include_metadata);
        FileManager::write_to_file(&output_path, &output).await?;

        info!(
            "Converted {:?} ({}, {} cues) to {:?}",
            input_file,
            document.format,
            document.cues.len(),
            output_path
        );
        Ok(ConversionOutcome::Written(output_path))
    }

    /// Convert every subtitle file under `input_dir`, next to its source
    pub async fn convert_folder(&self, input_dir: &Path, target: SubtitleFormat, force_overwrite: bool) -> Result<usize> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_subtitle_files(input_dir)?;
        info!("Found {} subtitle file(s) in {:?}", files.len(), input_dir);

        let mut converted = 0;
        for file in files {
            // Skip our own earlier outputs
            if Self::is_previous_output(&file, &self.config.output.file_suffix) {
                continue;
            }

            let output_dir = file.parent().unwrap_or(Path::new(".")).to_path_buf();
            match self.convert_file(&file, &output_dir, target, force_overwrite).await {
                Ok(ConversionOutcome::Written(_)) => converted += 1,
                Ok(ConversionOutcome::Skipped(_)) => {}
                Err(e) => error!("Error converting {:?}: {}", file, e),
            }
        }

        info!("Finished converting {} file(s)", converted);
        Ok(converted)
    }

    fn is_previous_output(path: &Path, suffix: &str) -> bool {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().ends_with(&format!(".{}", suffix)))
            .unwrap_or(false)
    }
}
