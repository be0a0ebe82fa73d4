use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a manual duplex job
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DuplexOptions {
    /// Source PDF
    pub input_file: PathBuf,

    /// How the printer ejects printed sheets; changes the re-insertion
    /// instructions, not the page order
    pub output_mode: OutputMode,

    /// How the stack goes back into the input tray
    pub reinsert_orientation: ReinsertOrientation,

    /// Which edge the back side flips around
    pub flip_edge: FlipEdge,
}

impl Default for DuplexOptions {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            output_mode: OutputMode::FaceDown,
            reinsert_orientation: ReinsertOrientation::Rotated180,
            flip_edge: FlipEdge::ShortEdge,
        }
    }
}

impl DuplexOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| DuplexError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| DuplexError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.input_file.as_os_str().is_empty() {
            return Err(DuplexError::Config("No input file specified".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_common_laser_printers() {
        let options = DuplexOptions::default();
        assert_eq!(options.output_mode, OutputMode::FaceDown);
        assert_eq!(options.reinsert_orientation, ReinsertOrientation::Rotated180);
        assert_eq!(options.flip_edge, FlipEdge::ShortEdge);
    }

    #[test]
    fn test_validate_requires_input_file() {
        let options = DuplexOptions::default();
        assert!(matches!(
            options.validate(),
            Err(DuplexError::Config(_))
        ));

        let options = DuplexOptions {
            input_file: PathBuf::from("report.pdf"),
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[tokio::test]
    async fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duplex.json");

        let options = DuplexOptions {
            input_file: PathBuf::from("report.pdf"),
            output_mode: OutputMode::FaceUp,
            ..Default::default()
        };
        options.save(&path).await.unwrap();

        let loaded = DuplexOptions::load(&path).await.unwrap();
        assert_eq!(loaded, options);
    }
}
