//! PDF export of a seminar.
//!
//! Layout: a title page with "Seminar on <Topic>", an "Introduction" heading
//! and the wrapped content, followed by one page per image.

use crate::error::{Result, SeminarError};
use crate::images::ImageRef;
use crate::text::{to_latin1_lossy, wrap_lines};
use crate::topic::Topic;
use printpdf::image_crate::{self, GenericImageView};
use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;

const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const CHARS_PER_LINE: usize = 90;

const IMAGE_X_MM: f32 = 15.0;
const IMAGE_TOP_MM: f32 = 40.0;
const IMAGE_WIDTH_MM: f32 = 180.0;
const IMAGE_DPI: f32 = 300.0;

const MM_PER_PT: f32 = 0.352_778;

/// Position and size of an image on its page, in millimetres from the
/// bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fit an image of `px_width` x `px_height` at the fixed width, keeping its
/// aspect ratio and shrinking it if it would run off the page.
pub fn image_placement(px_width: u32, px_height: u32) -> Placement {
    let aspect = px_width.max(1) as f32 / px_height.max(1) as f32;
    let max_height = PAGE_HEIGHT_MM - IMAGE_TOP_MM - MARGIN_MM;

    let (width, height) = {
        let height = IMAGE_WIDTH_MM / aspect;
        if height > max_height {
            (max_height * aspect, max_height)
        } else {
            (IMAGE_WIDTH_MM, height)
        }
    };

    Placement {
        x: IMAGE_X_MM,
        y: PAGE_HEIGHT_MM - IMAGE_TOP_MM - height,
        width,
        height,
    }
}

/// Approximate left edge that centers `text` in bold Helvetica.
fn centered_x(text: &str, size: f32) -> f32 {
    let width = text.chars().count() as f32 * size * 0.55 * MM_PER_PT;
    ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM)
}

fn pdf_error<E: std::fmt::Debug>(e: E) -> SeminarError {
    SeminarError::Export(format!("{:?}", e))
}

/// Writes `<topic_slug>.pdf` files into an export directory.
pub struct PdfExporter {
    export_dir: PathBuf,
}

impl PdfExporter {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Where the PDF for `topic` is written.
    pub fn pdf_path(&self, topic: &Topic) -> PathBuf {
        self.export_dir.join(format!("{}.pdf", topic.slug()))
    }

    /// Render the seminar and write it to disk. Unreadable images are skipped.
    #[instrument(skip(self, content, images), fields(topic = %topic, images = images.len()))]
    pub fn export(&self, topic: &Topic, content: &str, images: &[ImageRef]) -> Result<PathBuf> {
        let title = to_latin1_lossy(&format!("Seminar on {}", topic.title_case()));

        let (doc, page, layer) = PdfDocument::new(
            title.clone(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;

        let mut current = doc.get_page(page).get_layer(layer);
        let mut y = PAGE_HEIGHT_MM - 20.0;

        current.use_text(title.clone(), TITLE_SIZE, Mm(centered_x(&title, TITLE_SIZE)), Mm(y), &bold);
        y -= 20.0;

        current.use_text("Introduction", HEADING_SIZE, Mm(MARGIN_MM), Mm(y), &bold);
        y -= 15.0;

        for line in wrap_lines(&to_latin1_lossy(content), CHARS_PER_LINE) {
            if y < MARGIN_MM + LINE_HEIGHT_MM {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                current = doc.get_page(page).get_layer(layer);
                y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM;
            }
            if !line.is_empty() {
                current.use_text(line, BODY_SIZE, Mm(MARGIN_MM), Mm(y), &regular);
            }
            y -= LINE_HEIGHT_MM;
        }

        for image in images {
            let decoded = match load_image(&image.path) {
                Ok(decoded) => decoded,
                Err(e) => {
                    warn!("Image error in PDF ({:?}): {}", image.path, e);
                    continue;
                }
            };

            let (px_width, px_height) = decoded.dimensions();
            let placement = image_placement(px_width, px_height);
            let natural_width = px_width.max(1) as f32 / IMAGE_DPI * 25.4;
            let scale = placement.width / natural_width;

            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            let image_layer = doc.get_page(page).get_layer(layer);

            Image::from_dynamic_image(&decoded).add_to_layer(
                image_layer,
                ImageTransform {
                    translate_x: Some(Mm(placement.x)),
                    translate_y: Some(Mm(placement.y)),
                    scale_x: Some(scale),
                    scale_y: Some(scale),
                    dpi: Some(IMAGE_DPI),
                    ..Default::default()
                },
            );
        }

        std::fs::create_dir_all(&self.export_dir)?;
        let path = self.pdf_path(topic);
        let file = File::create(&path)?;
        doc.save(&mut BufWriter::new(file)).map_err(pdf_error)?;

        info!("Saved PDF to {:?}", path);
        Ok(path)
    }
}

/// Decode an image, sniffing the format from its bytes rather than the name.
fn load_image(path: &Path) -> Result<image_crate::DynamicImage> {
    image_crate::io::Reader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| SeminarError::Image(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_placement() {
        let p = image_placement(1600, 800);
        assert_eq!(p.x, 15.0);
        assert!((p.width - 180.0).abs() < 1e-3);
        assert!((p.height - 90.0).abs() < 1e-3);
        assert!((p.y - (297.0 - 40.0 - 90.0)).abs() < 1e-3);
    }

    #[test]
    fn test_tall_image_shrinks_to_page() {
        let p = image_placement(100, 1000);
        assert!((p.height - 247.0).abs() < 1e-3);
        assert!((p.width - 24.7).abs() < 1e-3);
        assert!(p.y >= MARGIN_MM - 1e-3);
    }

    #[test]
    fn test_pdf_path_uses_slug() {
        let exporter = PdfExporter::new("/tmp/out");
        let topic = Topic::new("black holes").unwrap();
        assert_eq!(exporter.pdf_path(&topic), PathBuf::from("/tmp/out/black_holes.pdf"));
    }

    #[test]
    fn test_export_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PdfExporter::new(dir.path());
        let topic = Topic::new("photosynthesis").unwrap();
        let content = "Plants convert light into chemical energy. ".repeat(200);

        let missing = ImageRef {
            path: dir.path().join("missing.jpg"),
            index: 1,
        };
        let path = exporter.export(&topic, &content, &[missing]).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_embeds_images() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("1.jpg");
        image_crate::RgbImage::new(40, 20).save_with_format(&image_path, image_crate::ImageFormat::Png).unwrap();

        let exporter = PdfExporter::new(dir.path());
        let topic = Topic::new("Gravity").unwrap();
        let image = ImageRef { path: image_path, index: 1 };
        let path = exporter.export(&topic, "Gravity pulls.", &[image]).unwrap();

        assert!(std::fs::metadata(path).unwrap().len() > 0);
    }
}
