use std::path::{Path, PathBuf};

use tarot_core::{collect_internal_css, filter_stylesheet, Html, Vocabulary};
use tarot_logging::{tarot_info, tarot_warn};

use crate::persist::{read_text, AtomicFileWriter, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum CssPipelineError {
    #[error("source page has no internal <style> blocks")]
    NoInternalCss,
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Stylesheet scoped to a target page, plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedCss {
    pub css: String,
    /// The filter kept nothing, so `css` is the source sheet unchanged.
    pub used_fallback: bool,
    pub class_count: usize,
    pub id_count: usize,
    pub source_len: usize,
}

/// Keep the internal CSS of `source_html` that styles classes or ids used
/// in `target_html`. When nothing is relevant the whole sheet is returned.
pub fn scope_stylesheet(source_html: &str, target_html: &str) -> Result<ScopedCss, CssPipelineError> {
    let vocabulary = Vocabulary::from_document(&Html::parse_document(target_html));
    if vocabulary.is_empty() {
        tarot_warn!("Target page uses no class or id");
    }
    tarot_info!(
        "Target uses {} classes and {} ids",
        vocabulary.class_names().len(),
        vocabulary.ids().len()
    );

    let source_css = collect_internal_css(&Html::parse_document(source_html));
    if source_css.is_empty() {
        return Err(CssPipelineError::NoInternalCss);
    }

    let filtered = filter_stylesheet(&vocabulary, &source_css);
    let used_fallback = filtered.is_empty();
    if used_fallback {
        tarot_warn!("No rule matches the target page; keeping the full internal stylesheet");
    }
    Ok(ScopedCss {
        css: if used_fallback { source_css.clone() } else { filtered },
        used_fallback,
        class_count: vocabulary.class_names().len(),
        id_count: vocabulary.ids().len(),
        source_len: source_css.len(),
    })
}

/// File-level variant of [`scope_stylesheet`]: reads both pages, writes the
/// result to `output` and returns where it went.
pub fn write_scoped_css(
    source: &Path,
    target: &Path,
    output: &Path,
) -> Result<(ScopedCss, PathBuf), CssPipelineError> {
    let target_html = read_text(target)?;
    let source_html = read_text(source)?;
    let scoped = scope_stylesheet(&source_html, &target_html)?;
    let (writer, filename) = AtomicFileWriter::for_path(output)?;
    let path = writer.write(&filename, &scoped.css)?;
    Ok((scoped, path))
}
