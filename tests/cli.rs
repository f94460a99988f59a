//! Command line tests
//!
//! Argument parsing and command output.

use clap::Parser;
use inputmask::cli::{execute, CliArgs, Command};
use inputmask::{AffinityCalculationStrategy, MaskConfig, Notation};

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("inputmask").chain(args.iter().copied())).unwrap()
}

fn run(args: &[&str]) -> String {
    let output = execute(parse(args).command, &MaskConfig::default()).unwrap();
    assert!(output.success);
    output.text
}

// ========================================================================
// Parsing
// ========================================================================

#[test]
fn test_parse_apply_flags() {
    let args = parse(&[
        "apply",
        "[X][00]",
        "A12",
        "--caret",
        "2",
        "--delete",
        "--autoskip",
        "--notation",
        "X=ABC",
    ]);
    assert_eq!(args.config, None);
    assert_eq!(
        args.command,
        Command::Apply {
            format: "[X][00]".to_string(),
            text: "A12".to_string(),
            caret: Some(2),
            delete: true,
            autocomplete: false,
            autoskip: true,
            rtl: false,
            notations: vec![Notation::mandatory('X', "ABC")],
        }
    );
}

#[test]
fn test_parse_pick_strategy() {
    let args = parse(&[
        "--config",
        "masks.yaml",
        "pick",
        "123",
        "--format",
        "[00]",
        "--affine",
        "[000]",
        "--affine",
        "[0000]",
        "--strategy",
        "capacity",
    ]);
    assert_eq!(args.config.as_deref(), Some(std::path::Path::new("masks.yaml")));
    let Command::Pick {
        affine_formats,
        strategy,
        ..
    } = args.command
    else {
        panic!("expected pick command");
    };
    assert_eq!(affine_formats, vec!["[000]", "[0000]"]);
    assert_eq!(strategy, Some(AffinityCalculationStrategy::Capacity));
}

#[test]
fn test_bad_notation_is_rejected() {
    let result = CliArgs::try_parse_from(["inputmask", "check", "[X]", "--notation", "XY=abc"]);
    assert!(result.is_err());
}

#[test]
fn test_bad_strategy_is_rejected() {
    let result = CliArgs::try_parse_from(["inputmask", "pick", "1", "--strategy", "best"]);
    assert!(result.is_err());
}

// ========================================================================
// Execution
// ========================================================================

#[test]
fn test_mask_and_unmask_commands() {
    assert_eq!(run(&["mask", "[00]-[00]", "1234"]), "12-34");
    assert_eq!(run(&["mask", "[00]-[00]", "12", "--autocomplete"]), "12-");
    assert_eq!(run(&["unmask", "{+7} [000]", "+7 123"]), "+7123");
}

#[test]
fn test_apply_prints_json() {
    let text = run(&["apply", "[00]-[00]", "12-", "--delete", "--autoskip"]);
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["formatted_text"]["string"], "12");
    assert_eq!(json["formatted_text"]["caret_position"], 2);
    assert_eq!(json["extracted_value"], "12");
    assert_eq!(json["complete"], false);
    assert_eq!(json["tail_placeholder"], "-00");
}

#[test]
fn test_placeholder_command() {
    let text = run(&["placeholder", "+1 ([000]) [000]-[00]-[00]"]);
    assert!(text.starts_with("placeholder: +1 (000) 000-00-00\n"));
    assert!(text.contains("total_value_length: 10"));
}

#[test]
fn test_check_command() {
    assert_eq!(run(&["check", "[0X]", "--notation", "X?=xyz"]), "valid");

    let output = execute(parse(&["check", "[00"]).command, &MaskConfig::default()).unwrap();
    assert!(!output.success);
    assert!(output.text.starts_with("invalid: "));
}

#[test]
fn test_pick_falls_back_to_config() {
    let config = MaskConfig::from_yaml(
        r#"
format: "[00]"
affine_formats: ["[0000]"]
"#,
    )
    .unwrap();
    let output = execute(parse(&["pick", "123"]).command, &config).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(json["format"], "[0000]");
    assert_eq!(json["result"]["formatted_text"]["string"], "123");
}
