use anyhow::Result;

use crate::{CliTest, stderr, stdout};

fn project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(
        "resources/views/welcome.blade.php",
        "<h1>{{ __('home.title') }}</h1>\n<p>@choice('home.visits', 3)</p>\n",
    )?;
    test.write_file("routes/web.php", "<?php Lang::get('nav.home');")?;
    Ok(test)
}

#[test]
fn test_generate_backs_up_by_default() -> Result<()> {
    let test = project()?;
    test.write_file("lang/en/home.php", "<?php return ['title' => 'Welcome home'];")?;

    let output = test.generate_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let files = test.list_dir("lang/en")?;
    assert!(files.contains(&"nav.php".to_string()));
    assert!(files.iter().any(|f| f.starts_with("home.php.backup_")));

    let home = test.read_file("lang/en/home.php")?;
    assert!(home.contains("'title' => 'Welcome home',"));
    assert!(home.contains("'visits' => 'Visits',"));
    assert!(stdout(&output).contains("Translation files updated for 1 locale"));

    Ok(())
}

#[test]
fn test_generate_force_skips_backup() -> Result<()> {
    let test = project()?;
    test.write_file("lang/en/home.php", "<?php return ['title' => 'Welcome home'];")?;

    let output = test.generate_command().arg("--force").output()?;
    assert!(output.status.success());
    assert_eq!(test.list_dir("lang/en")?, vec!["home.php", "nav.php"]);

    Ok(())
}

#[test]
fn test_generate_never_prunes_and_always_sorts() -> Result<()> {
    let test = project()?;
    test.write_file(
        ".locsyncrc.json",
        r#"{ "pruneMissing": true, "sort": false, "comments": false }"#,
    )?;
    test.write_file(
        "lang/en/home.php",
        "<?php return ['zebra' => 'Z', 'title' => 'Title'];",
    )?;

    let output = test.generate_command().arg("--force").output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_file("lang/en/home.php")?,
        "<?php\n\nreturn [\n    'title' => 'Title',\n    'visits' => 'Visits',\n    'zebra' => 'Z',\n];\n"
    );

    Ok(())
}

#[test]
fn test_generate_multiple_locales() -> Result<()> {
    let test = project()?;

    let output = test.generate_command().args(["en", "es"]).output()?;
    assert!(output.status.success());

    assert!(test.root().join("lang/en/nav.php").exists());
    assert!(test.root().join("lang/es/nav.php").exists());
    assert!(stdout(&output).contains("Translation files updated for 2 locales"));

    Ok(())
}

#[test]
fn test_generate_repeated_locale_runs_once() -> Result<()> {
    let test = project()?;

    let output = test.generate_command().args(["en", "es", "en"]).output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Translation files updated for 2 locales"));

    Ok(())
}

#[test]
fn test_generate_silent() -> Result<()> {
    let test = project()?;

    let output = test.generate_command().arg("--silent").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(test.root().join("lang/en/home.php").exists());

    Ok(())
}

#[test]
fn test_generate_uses_existing_resources_lang() -> Result<()> {
    let test = project()?;
    test.write_file("resources/lang/en/nav.php", "<?php return ['home' => 'Start'];")?;

    let output = test.generate_command().arg("--force").output()?;
    assert!(output.status.success());

    assert!(test.read_file("resources/lang/en/nav.php")?.contains("'home' => 'Start',"));
    assert!(!test.root().join("lang").exists());

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_generate_write_failure_exits_with_error() -> Result<()> {
    let test = project()?;
    // A directory where a unit file should go makes that write fail.
    std::fs::create_dir_all(test.root().join("lang/en/nav.php"))?;

    let output = test.generate_command().arg("--force").output()?;
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("Failed to write 1 translation file"));
    assert!(test.root().join("lang/en/home.php").exists());

    Ok(())
}
