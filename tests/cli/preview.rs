use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

const MESSAGES: &str = r#"{
  "home": { "title": "Welcome back", "subtitle": "Pick up where you left off" },
  "nav": { "settings": "Settings" }
}"#;

const APP: &str = "export function App() {
  return <h1>{t('home.title')}</h1>;
}
";

#[test]
fn test_preview_annotates_call_sites() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", MESSAGES)?;
    test.write_file("src/app.tsx", APP)?;

    assert_cmd_snapshot!(test.preview_command().arg("src/app.tsx"));

    Ok(())
}

#[test]
fn test_preview_multiple_annotations_on_one_line() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", MESSAGES)?;
    test.write_file(
        "src/nav.tsx",
        "const links = [t(\"nav.settings\"), t(`home.title`)];\n",
    )?;

    assert_cmd_snapshot!(test.preview_command().arg("src/nav.tsx"));

    Ok(())
}

#[test]
fn test_preview_missing_key_is_silent() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", MESSAGES)?;
    test.write_file("src/app.tsx", "t('missing.key')\n")?;

    assert_cmd_snapshot!(test.preview_command().arg("src/app.tsx"));

    Ok(())
}

#[test]
fn test_preview_truncates_long_values() -> Result<()> {
    let long = "x".repeat(50);
    let test = CliTest::with_file("en.json", &format!(r#"{{"long": "{}"}}"#, long))?;
    test.write_file("app.tsx", "t('long')")?;

    let output = test.preview_command().arg("app.tsx").output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    let expected = format!("t('long')  \u{279C}  {}...", "x".repeat(37));
    assert!(stdout.contains(&expected), "stdout: {}", stdout);
    assert!(!stdout.contains(&"x".repeat(38)));
    Ok(())
}

#[test]
fn test_preview_several_files_keeps_argument_order() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", MESSAGES)?;
    test.write_file("b.tsx", "t('nav.settings')\n")?;
    test.write_file("a.tsx", "t('home.subtitle')\n")?;

    assert_cmd_snapshot!(test.preview_command().args(["b.tsx", "a.tsx"]));

    Ok(())
}

#[test]
fn test_preview_without_locale_file() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;

    assert_cmd_snapshot!(test.preview_command().arg("src/app.tsx"));

    Ok(())
}

#[test]
fn test_preview_locale_path_flag_overrides_discovery() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", MESSAGES)?;
    test.write_file("locales/custom.json", r#"{"home": {"title": "Custom title"}}"#)?;
    test.write_file("src/app.tsx", APP)?;

    assert_cmd_snapshot!(
        test.preview_command()
            .args(["src/app.tsx", "--locale-path", "locales/custom.json"])
    );

    Ok(())
}

#[test]
fn test_preview_uses_config_file() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", MESSAGES)?;
    test.write_file("locales/custom.json", r#"{"home": {"title": "Custom title"}}"#)?;
    test.write_file(".ghostlensrc.json", r#"{ "localePath": "locales/custom.json" }"#)?;
    test.write_file("src/app.tsx", APP)?;

    let output = test.preview_command().arg("src/app.tsx").output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("\u{279C}  Custom title"), "stdout: {}", stdout);
    Ok(())
}

#[test]
fn test_preview_missing_config_path_falls_back_to_discovery() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", MESSAGES)?;
    test.write_file(".ghostlensrc.json", r#"{ "localePath": "locales/gone.json" }"#)?;
    test.write_file("src/app.tsx", APP)?;

    let output = test.preview_command().arg("src/app.tsx").output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("\u{279C}  Welcome back"), "stdout: {}", stdout);
    Ok(())
}

#[test]
fn test_preview_malformed_locale_file_shows_nothing() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", r#"{ "home": "#)?;
    test.write_file("src/app.tsx", APP)?;

    // stderr carries a tracing line and a serde_json message, so no snapshot
    let output = test.preview_command().arg("src/app.tsx").output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(stdout.contains("(no translations found)"));
    assert!(
        stderr.contains("failed to parse locale file"),
        "stderr: {}",
        stderr
    );
    Ok(())
}

#[test]
fn test_preview_unreadable_file_is_an_error() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", MESSAGES)?;

    let output = test.preview_command().arg("missing.tsx").output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Failed to read missing.tsx"), "stderr: {}", stderr);
    Ok(())
}

#[test]
fn test_preview_rejects_absolute_locale_path() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", APP)?;
    let absolute = test.root().join("messages").join("en.json");
    let root = test.root_filter();

    insta::with_settings!({ filters => vec![(root.as_str(), "[ROOT]")] }, {
        assert_cmd_snapshot!(
            test.preview_command()
                .arg("src/app.tsx")
                .arg("--locale-path")
                .arg(&absolute)
        );
    });

    Ok(())
}
