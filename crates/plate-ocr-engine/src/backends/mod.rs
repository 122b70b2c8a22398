pub mod replay;

#[cfg(feature = "engine-tesseract")]
pub mod tesseract;
