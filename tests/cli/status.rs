use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

const APP_VUE: &str = r#"<template>
  <h1>{{ $t('欢迎') }}</h1>
  <p>{{ $t("再见", { name }) }}</p>
</template>
"#;

const TRANSLATIONS: &str = r#"{
  "再见": { "en": "Goodbye" }
}
"#;

#[test]
fn test_status_reports_untranslated() -> Result<()> {
    let test = CliTest::with_file("src/App.vue", APP_VUE)?;
    test.write_file("locales/translation.json", TRANSLATIONS)?;

    assert_cmd_snapshot!(test.status_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: untranslated "欢迎"
      --> src/App.vue:2:10
      |
    2 |   <h1>{{ $t('欢迎') }}</h1>
      |          ^

    ✘ 1 untranslated key(s) in 1 occurrence(s), 1 translated (1 source file checked)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_status_all_lists_translated() -> Result<()> {
    let test = CliTest::with_file("src/App.vue", APP_VUE)?;
    test.write_file("locales/translation.json", TRANSLATIONS)?;

    assert_cmd_snapshot!(test.status_command().arg("--all"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: untranslated "欢迎"
      --> src/App.vue:2:10
      |
    2 |   <h1>{{ $t('欢迎') }}</h1>
      |          ^

    note: translated "再见"
      --> src/App.vue:3:9
      |
    3 |   <p>{{ $t("再见", { name }) }}</p>
      |         ^

    ✘ 1 untranslated key(s) in 1 occurrence(s), 1 translated (1 source file checked)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_status_clean_project() -> Result<()> {
    let test = CliTest::with_file("src/main.ts", "console.log($t('hello'));\n")?;
    test.write_file("locales/translation.json", r#"{ "hello": {} }"#)?;

    assert_cmd_snapshot!(test.status_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - all 1 key(s) translated

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_status_single_file() -> Result<()> {
    let test = CliTest::with_file("src/a.ts", "$t('a');\n")?;
    test.write_file("src/b.ts", "$t('b');\n")?;

    assert_cmd_snapshot!(test.status_command().args(["--file", "src/b.ts"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: untranslated "b"
      --> src/b.ts:1:1
      |
    1 | $t('b');
      | ^

    ✘ 1 untranslated key(s) in 1 occurrence(s), 0 translated (1 source file checked)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_status_skips_excluded_dirs() -> Result<()> {
    let test = CliTest::with_file("dist/bundle.js", "$t('built');\n")?;
    test.write_file("distribution/app.js", "$t('shipped');\n")?;

    assert_cmd_snapshot!(test.status_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: untranslated "shipped"
      --> distribution/app.js:1:1
      |
    1 | $t('shipped');
      | ^

    ✘ 1 untranslated key(s) in 1 occurrence(s), 0 translated (1 source file checked)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_status_custom_translation_path() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "$t('a');\n")?;
    test.write_file("i18n/strings.json", r#"{ "a": { "en": "A" } }"#)?;

    assert_cmd_snapshot!(test.status_command().args(["--translation-path", "i18n/strings.json"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - all 1 key(s) translated

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_status_config_from_file() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "i18n.tr('a'); $t('b');\n")?;
    test.write_file(".keyfillrc.json", r#"{ "marker": "i18n.tr" }"#)?;

    assert_cmd_snapshot!(test.status_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: untranslated "a"
      --> src/a.js:1:1
      |
    1 | i18n.tr('a'); $t('b');
      | ^

    ✘ 1 untranslated key(s) in 1 occurrence(s), 0 translated (1 source file checked)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_status_malformed_config_uses_defaults() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "$t('a');\n")?;
    test.write_file(".keyfillrc.json", "{ broken")?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.status_command(), @r#"
        success: false
        exit_code: 1
        ----- stdout -----
        warning: untranslated "a"
          --> src/a.js:1:1
          |
        1 | $t('a');
          | ^

        ✘ 1 untranslated key(s) in 1 occurrence(s), 0 translated (1 source file checked)

        ----- stderr -----
        warning: Failed to parse config file: "[ROOT]/.keyfillrc.json": key must be a string at line 1 column 3 (using default settings)
        "#);
    });

    Ok(())
}

#[test]
fn test_status_broken_translation_file_is_error() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "$t('a');\n")?;
    test.write_file("locales/translation.json", "[1, 2]")?;

    test.settings().bind(|| {
        assert_cmd_snapshot!(test.status_command(), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Root of translation file must be an object: [ROOT]/locales/translation.json
        ");
    });

    Ok(())
}

#[test]
fn test_status_invalid_utf8_is_still_scanned() -> Result<()> {
    let test = CliTest::new()?;
    std::fs::create_dir(test.root().join("src"))?;
    std::fs::write(test.root().join("src/a.js"), b"\xff $t('a');\n")?;

    assert_cmd_snapshot!(test.status_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: untranslated "a"
      --> src/a.js:1:3
      |
    1 | � $t('a');
      |   ^

    ✘ 1 untranslated key(s) in 1 occurrence(s), 0 translated (1 source file checked)

    ----- stderr -----
    "#);

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_status_unreadable_file_is_warning() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "$t('a');\n")?;
    std::os::unix::fs::symlink(test.root().join("src/gone.js"), test.root().join("src/b.js"))?;

    assert_cmd_snapshot!(test.status_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    warning: untranslated "a"
      --> src/a.js:1:1
      |
    1 | $t('a');
      | ^

    ✘ 1 untranslated key(s) in 1 occurrence(s), 0 translated (1 source file checked)

    ----- stderr -----
    warning: 1 file(s) could not be scanned (use -v for details)
    "#);

    test.settings().bind(|| {
        let mut cmd = test.status_command();
        // Keep debug logging out of the output
        cmd.arg("-v").env("RUST_LOG", "off");
        assert_cmd_snapshot!(cmd, @r#"
        success: false
        exit_code: 1
        ----- stdout -----
        warning: untranslated "a"
          --> src/a.js:1:1
          |
        1 | $t('a');
          | ^

        ✘ 1 untranslated key(s) in 1 occurrence(s), 0 translated (1 source file checked)

        ----- stderr -----
        warning: src/b.js: Cannot access path: IO error for operation on [ROOT]/src/b.js: No such file or directory (os error 2)
        "#);
    });

    Ok(())
}
