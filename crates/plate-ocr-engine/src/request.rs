use image::DynamicImage;

/// OCR invocation input: a decoded image and the languages to recognize.
#[derive(Debug)]
pub struct OcrRequest<'a> {
    image: &'a DynamicImage,
    languages: &'a [String],
}

impl<'a> OcrRequest<'a> {
    pub fn new(image: &'a DynamicImage, languages: &'a [String]) -> Self {
        Self { image, languages }
    }

    pub fn image(&self) -> &'a DynamicImage {
        self.image
    }

    pub fn languages(&self) -> &'a [String] {
        self.languages
    }
}
