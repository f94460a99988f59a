//! A masked text field, independent of any UI toolkit.
//!
//! The host forwards every text change (new content plus caret) and focus
//! event; the field decides whether the change was an insertion or a
//! deletion, picks the best mask and returns the text to display.

use std::sync::Arc;

use crate::affinity::select_best_mask;
use crate::cache::MaskCache;
use crate::config::MaskOptions;
use crate::format::FormatError;
use crate::mask::Mask;
use crate::model::{CaretGravity, CaretString, MaskResult};

#[derive(Debug)]
pub struct MaskedField {
    primary_format: String,
    options: MaskOptions,
    cache: Arc<MaskCache>,
    /// Formatted text after the last event
    text: String,
}

impl MaskedField {
    /// Create a field; the primary format is compiled immediately.
    pub fn new(
        primary_format: impl Into<String>,
        options: MaskOptions,
        cache: Arc<MaskCache>,
    ) -> Result<Self, FormatError> {
        let primary_format = primary_format.into();
        cache.get_or_create(
            &primary_format,
            &options.custom_notations,
            options.right_to_left,
        )?;
        Ok(Self {
            primary_format,
            options,
            cache,
            text: String::new(),
        })
    }

    pub fn primary_format(&self) -> &str {
        &self.primary_format
    }

    pub fn options(&self) -> &MaskOptions {
        &self.options
    }

    /// Formatted text after the last event
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The mask that fits `text` best among primary and affine formats.
    pub fn pick_mask(&self, text: &CaretString) -> Result<Arc<Mask>, FormatError> {
        select_best_mask(
            &self.cache,
            &self.primary_format,
            &self.options.affine_formats,
            &self.options.custom_notations,
            self.options.affinity_calculation_strategy,
            self.options.right_to_left,
            text,
        )
    }

    /// Reformat after the user edited the text.
    ///
    /// Shrinking text counts as a deletion.
    pub fn on_text_changed(
        &mut self,
        content: &str,
        caret_position: usize,
    ) -> Result<MaskResult, FormatError> {
        let is_deletion = self.text.chars().count() > content.chars().count();
        let caret_gravity = if is_deletion {
            CaretGravity::Backward {
                autoskip: self.options.autoskip,
            }
        } else {
            CaretGravity::Forward {
                autocomplete: self.options.autocomplete,
            }
        };

        let text = CaretString::new(content, caret_position, caret_gravity);
        let mask = self.pick_mask(&text)?;
        let result = mask.apply(&text);

        tracing::trace!(
            content,
            caret_position,
            is_deletion,
            formatted = %result.formatted_text.string,
            caret = result.formatted_text.caret_position,
            complete = result.complete,
            "field text changed"
        );

        self.text.clone_from(&result.formatted_text.string);
        Ok(result)
    }

    /// Autocomplete leading literals when the field gains focus.
    ///
    /// Returns `None` when autocompletion is disabled.
    pub fn on_focus(&mut self, content: &str) -> Result<Option<MaskResult>, FormatError> {
        if !self.options.autocomplete {
            return Ok(None);
        }

        let text = CaretString::at_end(content, CaretGravity::Forward { autocomplete: true });
        let mask = self.pick_mask(&text)?;
        let result = mask.apply(&text);
        tracing::trace!(content, formatted = %result.formatted_text.string, "field focused");

        self.text.clone_from(&result.formatted_text.string);
        Ok(Some(result))
    }
}
