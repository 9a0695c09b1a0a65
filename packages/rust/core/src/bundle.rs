//! Bundling several excerpts of one article with the material between them.

use std::path::Path;

use tracing::{debug, instrument};

use lenscheck_shared::{CollapsedExcerpt, ExcerptRequest, ExtractedExcerpt};

use crate::excerpt::extract_article_range;

/// Extract every requested excerpt and attach the text that was skipped.
///
/// Returns one [`CollapsedExcerpt`] per request, in request order. A failed
/// request occupies its slot with empty content and the error; it does not
/// affect its siblings, except that the excerpt after it gets no
/// `collapsed_before` (there is no end offset to measure from).
///
/// - `collapsed_before`: every excerpt but the first, the trimmed text
///   between the previous excerpt's end and this one's start.
/// - `collapsed_after`: the last excerpt only, the trimmed rest of the
///   article.
///
/// Empty collapsed text is left unset.
#[instrument(skip_all, fields(file = %file.display(), requests = excerpts.len()))]
pub fn bundle_article_with_collapsed(
    article: &str,
    excerpts: &[ExcerptRequest],
    file: &Path,
) -> Vec<CollapsedExcerpt> {
    let extracted: Vec<ExtractedExcerpt> = excerpts
        .iter()
        .map(|req| extract_article_range(article, req.from.as_deref(), req.to.as_deref(), file))
        .collect();

    let last = extracted.len().saturating_sub(1);
    let mut bundled = Vec::with_capacity(extracted.len());

    for (i, result) in extracted.iter().enumerate() {
        let span = match result {
            Ok(span) => span,
            Err(err) => {
                debug!(index = i, error = %err.message, "excerpt failed");
                bundled.push(CollapsedExcerpt::failed(err.clone()));
                continue;
            }
        };

        let collapsed_before = match i.checked_sub(1).map(|prev| &extracted[prev]) {
            Some(Ok(prev)) => collapsed_text(article, prev.end_index, span.start_index),
            _ => None,
        };
        let collapsed_after = if i == last {
            collapsed_text(article, span.end_index, article.len())
        } else {
            None
        };

        bundled.push(CollapsedExcerpt {
            content: span.content.clone(),
            collapsed_before,
            collapsed_after,
            error: None,
        });
    }

    bundled
}

/// Trimmed `article[from..to]`, or `None` if empty or the bounds overlap.
fn collapsed_text(article: &str, from: usize, to: usize) -> Option<String> {
    if from >= to {
        return None;
    }
    let text = article[from..to].trim();
    (!text.is_empty()).then(|| text.to_string())
}
