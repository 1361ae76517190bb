mod docx;
mod error;
mod fonts;
mod layout;
mod metrics;
mod model;
mod pdf;
mod theme;

pub use error::{Error, MetricsError};
pub use fonts::{FontBook, FontMetrics, FontProgram, FontWeight};
pub use metrics::{
    Alignment, Line, PARAGRAPH_SPACING, TextBlock, TextMetrics, TextStyle, split_paragraphs,
};
pub use model::{EducationEntry, ExperienceEntry, ResumeDocument, ResumeRequest};
pub use theme::{
    FontClass, FontFamily, PRESET_IDS, PaletteColor, ResolvedTheme, Rgb, Theme, ThemeColors,
};

/// The two downloadable artifact kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Pdf,
    Docx,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Pdf, OutputFormat::Docx];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Renders resumes with a fixed set of font programs. Each call is pure:
/// the same resume and theme always produce the same bytes.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    fonts: FontBook,
}

impl Renderer {
    pub fn new(fonts: FontBook) -> Renderer {
        Renderer { fonts }
    }

    /// Paginated A4 PDF.
    pub fn render_fixed_page(
        &self,
        resume: &ResumeDocument,
        theme: &Theme,
    ) -> Result<Vec<u8>, Error> {
        pdf::render(resume, &theme.resolve(), &self.fonts)
    }

    /// DOCX package; pagination is left to the word processor.
    pub fn render_flow_document(
        &self,
        resume: &ResumeDocument,
        theme: &Theme,
    ) -> Result<Vec<u8>, Error> {
        docx::render(resume, &theme.resolve(), &self.fonts)
    }

    pub fn render(
        &self,
        format: OutputFormat,
        resume: &ResumeDocument,
        theme: &Theme,
    ) -> Result<Vec<u8>, Error> {
        match format {
            OutputFormat::Pdf => self.render_fixed_page(resume, theme),
            OutputFormat::Docx => self.render_flow_document(resume, theme),
        }
    }
}

/// Render with the built-in core font metrics.
pub fn render_fixed_page(resume: &ResumeDocument, theme: &Theme) -> Result<Vec<u8>, Error> {
    Renderer::default().render_fixed_page(resume, theme)
}

pub fn render_flow_document(resume: &ResumeDocument, theme: &Theme) -> Result<Vec<u8>, Error> {
    Renderer::default().render_flow_document(resume, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Renderer>();
    }

    #[test]
    fn formats_name_their_artifacts() {
        assert_eq!(OutputFormat::Pdf.extension(), "pdf");
        assert_eq!(
            OutputFormat::Docx.mime_type(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
    }
}
