//! Translation between flattened text offsets and structured rich-text positions.
//!
//! Features like highlighting and search work on plain character offsets into a
//! document's flattened text, where every paragraph end and line-break end
//! counts as `\r\n`. Formatting is applied through positions anchored in the
//! document tree. `OffsetTranslator` converts between the two, walking the
//! document's structure through the `Navigator` contract.
//!
//! ```
//! use flatpos::DocumentBuilder;
//!
//! let doc = DocumentBuilder::new()
//!     .text_paragraph("ab")
//!     .text_paragraph("cd")
//!     .build();
//! let mut translator = doc.translator();
//!
//! let position = translator.position_at_offset(4);
//! assert_eq!(position.to_string(), "p1:0:0");
//! assert_eq!(translator.offset_at_position(&position), 4);
//! ```

mod document;
mod highlight;
pub(crate) mod settings;
mod translate;

pub use document::{
    Block, CharIndex, DocPointer, Document, DocumentBuilder, Inline, InlineBuilder, Location,
    Paragraph, TERMINATOR,
};
pub use highlight::{HighlightRule, Highlighter, StyledRange, Token};
pub use settings::{
    discover_settings, load_settings, try_load_settings, HighlightSettings, RuleSettings,
    Settings, SettingsError, SETTINGS_FILE,
};
pub use translate::{
    Boundary, ElementClass, ForwardScan, LogicalDirection, Navigator, OffsetTranslator,
    TextContainer, TranslateOptions, TERMINATOR_LEN,
};
