use std::path::PathBuf;

use lillio_download_adapters::DEFAULT_JPEG_QUALITY;

pub const INPUT_FILE: &str = "images.json";
pub const OUTPUT_SUBFOLDER: &str = "Lillio";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    /// Quality used when a JPEG has to be re-encoded to carry EXIF.
    pub jpeg_quality: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(INPUT_FILE),
            output_dir: default_output_dir(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

fn default_output_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_default()
        .join(OUTPUT_SUBFOLDER)
}
