//! The lesson-content directive dialect: validation and detection.
//!
//! Articles may use a small set of Markdown directives:
//!
//! ```text
//! :::note                 container, closed by a bare `:::`
//! :::collapse{open}       container with the `open` attribute
//! ::footnote[text]        leaf, on its own line
//! prose :footnote[text]   inline
//! ```
//!
//! [`validate_directives`] checks an article body for misuse with typo
//! suggestions. [`detect_directives_in_non_article`] flags directives in
//! files where they would render verbatim. Both are pure functions over text.

pub mod capabilities;
mod detect;
mod directives;
pub mod distance;
mod frontmatter;
mod syntax;
#[cfg(test)]
mod test_support;

pub use capabilities::{DirectiveCapability, DirectiveForm};
pub use detect::detect_directives_in_non_article;
pub use directives::validate_directives;
pub use distance::levenshtein;
pub use frontmatter::{SplitDocument, split_frontmatter};
