use anyhow::Result;
use insta::assert_snapshot;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .keyfillrc.json

    ----- stderr -----
    ");

    assert_snapshot!(test.read_file(".keyfillrc.json")?, @r#"
    {
      "translationPath": "locales/translation.json",
      "translateMode": "google",
      "sourceLang": "zh-CN",
      "targetLangs": [
        "en",
        "zh_CN",
        "zh_HK"
      ],
      "model": {
        "endpoint": "",
        "model": "",
        "apiKey": ""
      },
      "marker": "$t",
      "extensions": [
        "js",
        "jsx",
        "ts",
        "tsx",
        "vue"
      ],
      "excludeDirs": [
        "dist",
        "node_modules",
        ".next",
        ".nuxt"
      ],
      "ignores": []
    }
    "#);

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".keyfillrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .keyfillrc.json already exists
    ");
    assert_eq!(test.read_file(".keyfillrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_with_root() -> Result<()> {
    let test = CliTest::with_file("web/index.ts", "")?;

    assert_cmd_snapshot!(test.command().args(["init", "--root", "web"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .keyfillrc.json

    ----- stderr -----
    ");
    assert!(test.root().join("web/.keyfillrc.json").exists());
    assert!(!test.root().join(".keyfillrc.json").exists());

    Ok(())
}

#[test]
fn test_init_missing_root() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().args(["init", "--root", "missing"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Project root not found: missing
    ");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "export const title = 'plain';\n")?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());

    assert_cmd_snapshot!(test.status_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - all 0 key(s) translated

    ----- stderr -----
    ");

    Ok(())
}
