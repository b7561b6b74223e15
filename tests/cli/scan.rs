use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

fn laravel_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(
        "app/Http/Controllers/DashboardController.php",
        r#"<?php
class DashboardController
{
    public function index()
    {
        // __('commented.out')
        return view('dashboard', ['title' => __('dashboard.title')]);
    }
}
"#,
    )?;
    test.write_file(
        "resources/views/auth/login.blade.php",
        r#"<h1>@lang('auth.failed')</h1>
{{-- $t('ignored.key') --}}
<p>{{ trans("auth.login.help") }}</p>
"#,
    )?;
    Ok(test)
}

#[test]
fn test_scan_writes_nested_files() -> Result<()> {
    let test = laravel_project()?;

    let output = test.scan_command().arg("en").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Scanned 2 source files, found 3 translation keys"));

    assert_eq!(test.list_dir("lang/en")?, vec!["auth.php", "dashboard.php"]);
    assert_eq!(
        test.read_file("lang/en/auth.php")?,
        r#"<?php

/**
 * Translation file: auth
 * Locale: en
 * Generated by locsync
 */

return [
    'failed' => 'Failed',
    'login' => [
        'help' => 'Help',
    ],
];
"#
    );
    assert!(
        test.read_file("lang/en/dashboard.php")?
            .contains("    'title' => 'Title',\n")
    );

    Ok(())
}

#[test]
fn test_scan_preserves_existing_translations() -> Result<()> {
    let test = laravel_project()?;
    test.write_file(
        "lang/en/auth.php",
        "<?php\n\nreturn [\n    'failed' => 'These credentials do not match our records.',\n    'legacy' => 'Kept',\n];\n",
    )?;

    let output = test.scan_command().output()?;
    assert!(output.status.success());

    let auth = test.read_file("lang/en/auth.php")?;
    assert!(auth.contains("'failed' => 'These credentials do not match our records.',"));
    assert!(auth.contains("'legacy' => 'Kept',"));
    assert!(auth.contains("'help' => 'Help',"));

    Ok(())
}

#[test]
fn test_scan_prune_missing() -> Result<()> {
    let test = laravel_project()?;
    test.write_file(
        "lang/en/auth.php",
        "<?php return ['failed' => 'Failed', 'legacy' => 'Gone'];",
    )?;

    let output = test.scan_command().arg("--prune-missing").output()?;
    assert!(output.status.success());

    let auth = test.read_file("lang/en/auth.php")?;
    assert!(!auth.contains("legacy"));
    assert!(stdout(&output).contains("pruned 1"));

    Ok(())
}

#[test]
fn test_scan_single_document_format() -> Result<()> {
    let test = laravel_project()?;

    let output = test
        .scan_command()
        .args(["en", "fr", "--format", "json"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let en: Value = serde_json::from_str(&test.read_file("lang/en.json")?)?;
    assert_eq!(en["auth.failed"], "Failed");
    assert_eq!(en["auth.login.help"], "Help");
    assert_eq!(en["dashboard.title"], "Title");
    assert!(en.get("ignored.key").is_none());
    assert!(en.get("commented.out").is_none());
    assert!(test.root().join("lang/fr.json").exists());

    Ok(())
}

#[test]
fn test_scan_dry_run_writes_nothing() -> Result<()> {
    let test = laravel_project()?;

    let output = test.scan_command().arg("--dry-run").output()?;
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("en: would add 3 keys"));
    assert!(out.contains("+ auth.failed"));
    assert!(out.contains("Dry run completed. No files were modified."));
    assert!(!test.root().join("lang").exists());

    Ok(())
}

#[test]
fn test_scan_list_missing() -> Result<()> {
    let test = laravel_project()?;
    test.write_file("lang/en.json", r#"{"auth.failed": "Failed"}"#)?;

    let output = test
        .scan_command()
        .args(["--format", "single-document", "--list-missing", "--dry-run"])
        .output()?;
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("2 missing translations for en"));
    assert!(out.contains("- auth.login.help"));
    assert!(out.contains("- dashboard.title"));

    Ok(())
}

#[test]
fn test_scan_invalid_format_fails_before_scanning() -> Result<()> {
    let test = laravel_project()?;

    let output = test.scan_command().args(["--format", "yaml"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid format \"yaml\""));
    assert!(!stdout(&output).contains("Scanned"));

    Ok(())
}

#[test]
fn test_scan_no_keys_is_success() -> Result<()> {
    let test = CliTest::with_file("app/Empty.php", "<?php echo 'hello';")?;

    let output = test.scan_command().output()?;
    assert!(output.status.success());
    assert!(stderr(&output).contains("No translation keys found"));
    assert!(!test.root().join("lang").exists());

    Ok(())
}

#[test]
fn test_scan_backup() -> Result<()> {
    let test = laravel_project()?;
    test.write_file("lang/en/auth.php", "<?php return ['failed' => 'Old'];")?;

    let output = test.scan_command().arg("--backup").output()?;
    assert!(output.status.success());

    let files = test.list_dir("lang/en")?;
    assert_eq!(files.len(), 3);
    assert!(files.iter().any(|f| f.starts_with("auth.php.backup_")));

    Ok(())
}

#[test]
fn test_scan_uses_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".locsyncrc.json",
        r#"{
  "locales": ["de"],
  "dirs": ["src"],
  "patterns": ["*.vue"],
  "functions": ["$t"],
  "comments": false,
  "indent": 2,
  "langRoot": "locales"
}"#,
    )?;
    test.write_file("src/App.vue", "<template>{{ $t('nav.home') }}</template>")?;
    test.write_file("src/ignored.php", "<?php __('php.key');")?;

    let output = test.scan_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_file("locales/de/nav.php")?,
        "<?php\n\nreturn [\n  'home' => 'Home',\n];\n"
    );

    Ok(())
}

#[test]
fn test_scan_invalid_config_fails() -> Result<()> {
    let test = CliTest::with_file(".locsyncrc.json", r#"{ "format": "xml" }"#)?;

    let output = test.scan_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to parse config file"));

    Ok(())
}
