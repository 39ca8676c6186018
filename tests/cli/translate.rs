use anyhow::Result;
use insta::assert_snapshot;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, UNREACHABLE_ENDPOINT};

fn model_config(langs: &[&str]) -> String {
    serde_json::json!({
        "translateMode": "model",
        "model": { "endpoint": UNREACHABLE_ENDPOINT, "model": "test" },
        "targetLangs": langs,
    })
    .to_string()
}

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "src/pages/index.vue",
        r#"<template>
  <h1>{{ $t('欢迎') }}</h1>
  <p>{{ $t('再见') }}</p>
  <p>{{ $t('欢迎') }}</p>
</template>
"#,
    )?;
    test.write_file(
        "locales/translation.json",
        r#"{
  "再见": {
    "en": "Goodbye"
  }
}
"#,
    )?;
    Ok(test)
}

#[test]
fn test_translate_dry_run() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.translate_command().arg("--dry-run"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Would translate 1 key(s) from zh-CN into en, zh_CN, zh_HK:
      - 欢迎
    Run without --dry-run to translate them.

    ----- stderr -----
    ");
    assert!(test.read_file("locales/translation.json")?.contains("Goodbye"));

    Ok(())
}

#[test]
fn test_translate_nothing_to_do() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "$t('x');\n")?;
    test.write_file("locales/translation.json", r#"{ "x": { "en": "X" } }"#)?;

    assert_cmd_snapshot!(test.translate_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Nothing to translate - all keys are translated

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_translate_failed_pairs_are_saved_empty() -> Result<()> {
    let test = project()?;
    test.write_file(".keyfillrc.json", &model_config(&["en", "fr"]))?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.translate_command(), @r#"
        success: false
        exit_code: 1
        ----- stdout -----
        ✓ Translated 1 key(s) into en, fr (1 added, 0 replaced)
        warning: 2 translation(s) failed and were saved as empty strings

        ----- stderr -----

        Translating 1/1
        warning: "欢迎" [en]: Network error: [ERROR]
        warning: "欢迎" [fr]: Network error: [ERROR]
        "#);
    });

    assert_snapshot!(test.read_file("locales/translation.json")?, @r#"
    {
      "再见": {
        "en": "Goodbye"
      },
      "欢迎": {
        "en": "",
        "fr": ""
      }
    }
    "#);

    // Empty values still count as translated.
    assert_cmd_snapshot!(test.status_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - all 2 key(s) translated

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_translate_cli_overrides_config() -> Result<()> {
    let test = project()?;
    test.write_file(".keyfillrc.json", &model_config(&["en", "fr"]))?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.translate_command().args(["--langs", "ja", "--from", "zh-TW"]), @r#"
        success: false
        exit_code: 1
        ----- stdout -----
        ✓ Translated 1 key(s) into ja (1 added, 0 replaced)
        warning: 1 translation(s) failed and were saved as empty strings

        ----- stderr -----

        Translating 1/1
        warning: "欢迎" [ja]: Network error: [ERROR]
        "#);
    });

    let store: serde_json::Value =
        serde_json::from_str(&test.read_file("locales/translation.json")?)?;
    assert_eq!(store["欢迎"], serde_json::json!({ "ja": "" }));

    Ok(())
}

#[test]
fn test_translate_model_mode_requires_endpoint() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.translate_command().args(["--mode", "model"]), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: 'model.endpoint' is required when 'translateMode' is "model"
    "#);

    Ok(())
}

#[test]
fn test_translate_malformed_config_is_error() -> Result<()> {
    let test = project()?;
    test.write_file(".keyfillrc.json", "{ broken")?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.translate_command(), @r#"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Failed to parse config file: "[ROOT]/.keyfillrc.json": key must be a string at line 1 column 3
        "#);
    });

    Ok(())
}

#[test]
fn test_translate_persist_failure_lists_pending_keys() -> Result<()> {
    let test = project()?;
    test.write_file(".keyfillrc.json", &model_config(&["en"]))?;
    // A file where the translation directory should be.
    test.write_file("blocked", "")?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.translate_command().args(["--translation-path", "blocked/translation.json"]), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----

        Translating 1/2
        Translating 2/2
        error: Failed to save 2 translated key(s): Failed to write translation file: [ROOT]/blocked/translation.json
        Pending keys:
          - 欢迎
          - 再见
        ");
    });

    Ok(())
}
