//! Whole-script tests for wdgen.
//!
//! These exercise the public surface end to end: a recorded test case or
//! suite in, the complete Perl script out.

use pretty_assertions::assert_eq;
use wdgen::prelude::*;

fn script(options: &FormatOptions, body: &[&str]) -> String {
    let mut out = options.render_header();
    for line in body {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&options.render_footer());
    out
}

// ============================================================================
// Test cases
// ============================================================================

#[test]
fn search_flow_renders_in_recorded_order() {
    let test = TestCase::new("Search")
        .command("open", "/", "")
        .command("type", "id=q", "perl webdriver")
        .command("clickAndWait", "css=#go", "")
        .command("waitForPageToLoad", "30000", "")
        .command("assertTitle", "Results*", "")
        .command("verifyText", "id=count", "3")
        .command("storeTitle", "title", "")
        .command("echo", "Title was ${title}", "")
        .command("pause", "2500", "");

    let options = FormatOptions::default();
    let out = format_test_case(&test, &options).unwrap();

    let expected = script(
        &options,
        &[
            r#"$driver->get("/");"#,
            r#"$driver->find_element("q", "id")->clear;"#,
            r#"$driver->find_element("q", "id")->send_keys("perl webdriver");"#,
            r##"$driver->find_element("#go", "css")->click;"##,
            "like(qr/^Results.*$/, $driver->get_title);",
            r#"is($driver->find_element("count", "id")->get_text, "3"); # verify"#,
            "my $title = $driver->get_title;",
            r#"note "Title was " . $title;"#,
            "sleep 2.5;",
        ],
    );
    assert_eq!(out, expected);
}

#[test]
fn default_header_connects_to_local_firefox() {
    let out = format_test_case(&TestCase::new("Empty"), &FormatOptions::default()).unwrap();
    assert!(out.starts_with("use strict;\nuse warnings;\n"));
    assert!(out.contains("use Time::HiRes qw(sleep);"));
    assert!(out.contains("use Test::More;"));
    assert!(out.contains(r#"my $driver = Selenium::Remote::Driver->new( remote_server_addr => "localhost","#));
    assert!(out.contains("port => 4444,"));
    assert!(out.contains(r#"browser_name => "firefox");"#));
    assert!(out.ends_with("$driver->quit();\ndone_testing();\n"));
}

#[test]
fn receiver_option_flows_into_every_call() {
    let options = FormatOptions::default().with_receiver("$sel");
    let test = TestCase::new("Receiver")
        .command("open", "/", "")
        .command("assertElementPresent", "name=q", "");
    let out = format_test_case(&test, &options).unwrap();

    assert!(out.contains("my $sel = Selenium::Remote::Driver->new("));
    assert!(out.contains(r#"$sel->get("/");"#));
    assert!(out.contains(r#"ok(scalar(@{ $sel->find_elements("q", "name") }));"#));
    assert!(out.contains("$sel->quit();"));
    assert!(!out.contains("$driver"));
}

#[test]
fn initial_indent_applies_to_body_only() {
    let options = FormatOptions::default()
        .with_indent(Indent::Spaces(4))
        .with_initial_indents(1);
    let test = TestCase::new("Indented")
        .command("refresh", "", "")
        .command("goBack", "", "");
    let out = format_test_case(&test, &options).unwrap();

    let expected = script(&options, &["    $driver->refresh;", "    $driver->go_back;"]);
    assert_eq!(out, expected);
}

#[test]
fn show_selenese_comments_each_command() {
    let options = FormatOptions::default().with_show_selenese(true);
    let test = TestCase::new("Selenese").command("click", "link=Home", "");
    let out = format_test_case(&test, &options).unwrap();

    let expected = script(
        &options,
        &[
            "# click | link=Home | ",
            r#"$driver->find_element("Home", "link")->click;"#,
        ],
    );
    assert_eq!(out, expected);
}

#[test]
fn comments_are_carried_through() {
    let options = FormatOptions::default();
    let test = TestCase::new("Comments")
        .comment("log in first")
        .command("close", "", "");
    let out = format_test_case(&test, &options).unwrap();
    assert_eq!(out, script(&options, &["# log in first", "$driver->close;"]));
}

#[test]
fn waits_poll_sixty_times() {
    let options = FormatOptions::default();
    let test = TestCase::new("Waits")
        .command("waitForElementPresent", "id=done", "")
        .command("waitForNotTitle", "Loading", "");
    let out = format_test_case(&test, &options).unwrap();

    assert!(out.contains(
        r#"for (1..60) { my $ret = 0; eval { $ret = scalar(@{ $driver->find_elements("done", "id") }) }; last if !$@ && $ret; sleep 1 }"#
    ));
    assert!(out.contains(
        r#"for (1..60) { my $ret = 1; eval { $ret = ($driver->get_title eq "Loading") }; last if $@ || !$ret; sleep 1 }"#
    ));
}

#[test]
fn failing_command_stops_the_case() {
    let test = TestCase::new("Broken")
        .command("open", "/", "")
        .command("dragAndDropToObject", "id=a", "id=b");
    let err = format_test_case(&test, &FormatOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported command 'dragAndDropToObject'");
}

#[test]
fn unknown_locator_strategy_message() {
    let test = TestCase::new("Locator").command("click", "ui=button", "");
    let err = format_test_case(&test, &FormatOptions::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error: unknown strategy [ui] for locator [button]"
    );
}

#[test]
fn sigils_in_recorded_text_stay_literal() {
    let test = TestCase::new("Sigils").command("type", "id=price", "$5 @ shop");
    let out = format_test_case(&test, &FormatOptions::default()).unwrap();
    assert!(out.contains(r#"->send_keys("\$5 \@ shop");"#));
}

#[test]
fn loaded_yaml_case_matches_builder() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("login.yaml");
    std::fs::write(
        &path,
        "title: Login\ncommands:\n  - command: open\n    target: /login\n  - comment: submit the form\n  - command: submit\n    target: id=login\n",
    )
    .unwrap();

    let loaded = TestCase::load(&path).unwrap();
    let built = TestCase::new("Login")
        .command("open", "/login", "")
        .comment("submit the form")
        .command("submit", "id=login", "");
    assert_eq!(loaded.title, built.title);
    assert_eq!(loaded.commands, built.commands);

    let options = FormatOptions::default();
    assert_eq!(
        format_test_case(&loaded, &options).unwrap(),
        format_test_case(&built, &options).unwrap()
    );
}

#[test]
fn options_file_with_unknown_placeholder_is_rejected() {
    let err = FormatOptions::from_yaml_str("header: \"my ${browser} = 1;\\n\"\n").unwrap_err();
    assert!(err.to_string().contains("${browser}"));
}

// ============================================================================
// Suites
// ============================================================================

#[test]
fn suite_requires_tests_in_order() {
    let suite = TestSuite {
        title: "Smoke".to_string(),
        tests: vec![
            TestCaseRef::saved("Login", "login.t"),
            TestCaseRef::unsaved("Scratch"),
            TestCaseRef::saved("Checkout", "flows.v2/checkout.t"),
        ],
    };

    let expected = concat!(
        "use File::Basename qw(dirname);\n",
        "use File::Spec;\n",
        "\n",
        "# output T/F as Green/Red\n",
        "$ENV{HARNESS_COLOR} = 1;\n",
        "\n",
        "require File::Spec->catfile(dirname(__FILE__), \"login\");\n",
        "require \"Scratch\";\n",
        "require File::Spec->catfile(dirname(__FILE__), \"flows.v2/checkout\");\n",
    );
    assert_eq!(format_suite(&suite), expected);
}

#[test]
fn empty_suite_is_prelude_only() {
    let out = format_suite(&TestSuite::default());
    assert!(out.ends_with("$ENV{HARNESS_COLOR} = 1;\n\n"));
    assert!(!out.contains("require"));
}

// ============================================================================
// Manifests
// ============================================================================

#[test]
fn generated_script_round_trips_through_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("search.t");
    let test = TestCase::new("Search").command("open", "/", "");
    let out = format_test_case(&test, &FormatOptions::default()).unwrap();

    let metadata = GenerationMetadata::for_input("title: Search", "wdgen case search.yaml");
    write_with_manifest(&path, &out, metadata).unwrap();
    verify(&path).unwrap();

    std::fs::write(&path, out.replace("get(\"/\")", "get(\"/admin\")")).unwrap();
    assert!(matches!(
        verify(&path).unwrap_err(),
        GenError::HashMismatch { .. }
    ));
}
