// tests/cli_menu.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::io::Cursor;

use swarmherd::cli::{MenuChoice, confirm_destructive, read_choice};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn every_menu_number_maps_to_its_action() {
    init_tracing();
    assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Supervise));
    assert_eq!(MenuChoice::parse("2"), Some(MenuChoice::RunOnce));
    assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::FreshInstall));
    assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::UpdateConfig));
    assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::SelfHeal));
    assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::DeleteCredentials));
    assert_eq!(MenuChoice::parse("7"), None);
    assert_eq!(MenuChoice::parse("supervise"), None);
}

#[test]
fn whitespace_around_the_choice_is_tolerated() {
    init_tracing();
    assert_eq!(MenuChoice::parse(" 2 \n"), Some(MenuChoice::RunOnce));
}

#[test]
fn invalid_input_reprompts_until_valid() -> TestResult {
    init_tracing();
    let mut input = Cursor::new(b"0\nx\n4\n".to_vec());
    let mut output = Vec::new();

    let choice = read_choice(&mut input, &mut output)?;

    assert_eq!(choice, MenuChoice::UpdateConfig);
    let printed = String::from_utf8(output)?;
    assert!(printed.contains("invalid choice: 0"));
    assert!(printed.contains("invalid choice: x"));
    Ok(())
}

#[test]
fn closed_stdin_is_an_error_not_a_hang() {
    init_tracing();
    let mut input = Cursor::new(Vec::new());
    let mut output = Vec::new();

    assert!(read_choice(&mut input, &mut output).is_err());
}

#[test]
fn destructive_confirmation_requires_yes() -> TestResult {
    init_tracing();

    let mut output = Vec::new();
    let mut input = Cursor::new(b"yes\n".to_vec());
    assert!(confirm_destructive(&mut input, &mut output, "wipe it")?);

    let mut input = Cursor::new(b"YES\n".to_vec());
    assert!(confirm_destructive(&mut input, &mut output, "wipe it")?);

    let mut input = Cursor::new(b"y\n".to_vec());
    assert!(!confirm_destructive(&mut input, &mut output, "wipe it")?);

    let mut input = Cursor::new(b"\n".to_vec());
    assert!(!confirm_destructive(&mut input, &mut output, "wipe it")?);
    Ok(())
}
