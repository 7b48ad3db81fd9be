use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ImportImagesCommand {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
}
