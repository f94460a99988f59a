//! Masked field tests
//!
//! Simulates a user typing into and deleting from a field.

use std::sync::Arc;

use inputmask::{AffinityCalculationStrategy, MaskCache, MaskOptions, MaskedField, Notation};

fn field(format: &str, options: MaskOptions) -> MaskedField {
    MaskedField::new(format, options, Arc::new(MaskCache::new())).unwrap()
}

/// Feed `content` with the caret at its end; returns the displayed text
fn type_text(field: &mut MaskedField, content: &str) -> String {
    let caret = content.chars().count();
    field
        .on_text_changed(content, caret)
        .unwrap()
        .formatted_text
        .string
}

#[test]
fn test_typing_digit_by_digit() {
    let mut f = field("[00]-[00]", MaskOptions::default());
    assert_eq!(type_text(&mut f, "1"), "1");
    assert_eq!(type_text(&mut f, "12"), "12-");
    assert_eq!(type_text(&mut f, "12-3"), "12-3");
    assert_eq!(type_text(&mut f, "12-34"), "12-34");
    assert_eq!(type_text(&mut f, "12-345"), "12-34");
    assert_eq!(f.text(), "12-34");
}

#[test]
fn test_backspace_over_separator_with_autoskip() {
    let options = MaskOptions {
        autoskip: true,
        ..MaskOptions::default()
    };
    let mut f = field("[00]-[00]", options);
    assert_eq!(type_text(&mut f, "12"), "12-");

    let result = f.on_text_changed("12", 2).unwrap();
    assert_eq!(result.formatted_text.string, "12");
    assert_eq!(result.formatted_text.caret_position, 2);

    assert_eq!(type_text(&mut f, "1"), "1");
}

#[test]
fn test_backspace_into_separator_with_autoskip() {
    let options = MaskOptions {
        autoskip: true,
        ..MaskOptions::default()
    };
    let mut f = field("[00]-[00]", options);
    type_text(&mut f, "12-3");

    let result = f.on_text_changed("12-", 3).unwrap();
    assert_eq!(result.formatted_text.string, "12");
    assert_eq!(result.formatted_text.caret_position, 2);
    assert_eq!(result.extracted_value, "12");
}

#[test]
fn test_backspace_without_autoskip_keeps_separator() {
    let mut f = field("[00]-[00]", MaskOptions::default());
    type_text(&mut f, "12-3");
    let result = f.on_text_changed("12-", 3).unwrap();
    assert_eq!(result.formatted_text.string, "12-");
}

#[test]
fn test_focus_shows_fixed_prefix() {
    let mut f = field("{+7} ([000])", MaskOptions::default());
    let result = f.on_focus("").unwrap().unwrap();
    assert_eq!(result.formatted_text.string, "+7 (");
    assert_eq!(result.formatted_text.caret_position, 4);
    assert_eq!(result.extracted_value, "+7");
    assert_eq!(f.text(), "+7 (");
}

#[test]
fn test_affine_formats_switch_layout() {
    let options = MaskOptions {
        affine_formats: vec!["[0000]-[0000]".to_string()],
        affinity_calculation_strategy: AffinityCalculationStrategy::Prefix,
        ..MaskOptions::default()
    };
    let mut f = field("[00]-[00]", options);
    assert_eq!(type_text(&mut f, "12-34"), "12-34");
    assert_eq!(type_text(&mut f, "12345"), "1234-5");
}

#[test]
fn test_fields_share_cache() {
    let cache = Arc::new(MaskCache::new());
    let mut a = MaskedField::new("[00]", MaskOptions::default(), Arc::clone(&cache)).unwrap();
    let mut b = MaskedField::new("[00]", MaskOptions::default(), Arc::clone(&cache)).unwrap();
    a.on_text_changed("1", 1).unwrap();
    b.on_text_changed("2", 1).unwrap();
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_custom_notations_from_options() {
    let options = MaskOptions {
        custom_notations: vec![Notation::mandatory('X', "0123456789ABCDEF")],
        ..MaskOptions::default()
    };
    let mut f = field("{#}[XXXXXX]", options);
    assert_eq!(type_text(&mut f, "FF00AA"), "#FF00AA");
    assert_eq!(type_text(&mut f, "#FF00AAG"), "#FF00AA");
}

#[test]
fn test_right_to_left_field() {
    let options = MaskOptions {
        right_to_left: true,
        autocomplete: false,
        ..MaskOptions::default()
    };
    let mut f = field("[00]-[000]", options);
    assert_eq!(type_text(&mut f, "12345"), "12-345");
}
