use std::path::Path;

use image::DynamicImage;

use crate::error::OcrError;

/// Decode the image at `path`. Missing or undecodable files are fatal for a run.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, OcrError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| OcrError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}
