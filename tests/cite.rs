use assert_cmd::Command;
use predicates::prelude::*;

fn cit() -> Command {
    let mut cmd = Command::cargo_bin("cit").expect("binary built");
    cmd.env("NO_COLOR", "1")
        .env_remove("WORDNIK_LIST")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cite_full_citation() -> Result<(), Box<dyn std::error::Error>> {
    let output = cit()
        .args([
            "cite",
            "spinning rust",
            "--defn",
            "A computer hard disk using magnetic storage.",
            "-q",
            "I moved 10 gigs of email archives to Spinning Rust this morning.",
            "-s",
            "erics",
            "--source-roman",
            "-d",
            "16 March 2015",
            "--no-clipboard",
        ])
        .output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(
        stdout,
        "<b>spinning rust</b>, <i>n.</i> A computer hard disk using magnetic storage.\n\n\
         erics, 16 March 2015:\n\n\
         <blockquote>I moved 10 gigs of email archives to <b>Spinning Rust</b> this morning.</blockquote>\n\n"
    );
    Ok(())
}

#[test]
fn cite_defaults_to_today() {
    cit()
        .args(["cite", "word", "--no-clipboard"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^<b>word</b>, <i>n\.</i>\n\n[1-9]\d? [A-Z][a-z]+ \d{4}:\n\n$").unwrap());
}

#[test]
fn cite_guesses_source_and_date_from_url() {
    let url = "http://www.theguardian.com/science/2016/jan/20/ninth-planet-solar-system-edge-discovery-pluto";
    cit()
        .args(["cite", "planet", "-u", url, "--no-clipboard"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "<a href=\"{url}\"><i>The Guardian</i>, 20 January 2016</a>:"
        )))
        // Nobody answered, so the default of "no" applies.
        .stderr(predicate::str::contains("Save '").and(predicate::str::contains("Not saving")));
}

#[test]
fn cite_rejects_unparsable_date() -> Result<(), Box<dyn std::error::Error>> {
    let output = cit()
        .args(["cite", "word", "-d", "not a date", "--no-clipboard"])
        .output()?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(strip_ansi_escapes::strip(output.stderr))?;
    assert!(
        stderr.contains("unrecognised date: \"not a date\""),
        "stderr mismatch. stderr=\n{}",
        stderr
    );
    Ok(())
}

#[test]
fn cite_rejects_empty_word() {
    cit()
        .args(["cite", "", "--no-clipboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn cite_declining_list_does_not_need_credentials() {
    cit()
        .env_remove("WORDNIK_API_KEY")
        .env_remove("WORDNIK_USERNAME")
        .env_remove("WORDNIK_PASSWORD")
        .args(["cite", "word", "-l", "new-to-me--2016", "--no-clipboard"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Add 'word' to new-to-me--2016 on Wordnik? [y/N]"))
        .stderr(predicate::str::contains("Not posting"));
}

#[test]
fn cite_accepting_list_without_credentials_fails() {
    cit()
        .env_remove("WORDNIK_API_KEY")
        .env_remove("WORDNIK_USERNAME")
        .env_remove("WORDNIK_PASSWORD")
        .args(["cite", "word", "-l", "new-to-me--2016", "--no-clipboard"])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wordnik credentials missing"));
}

#[test]
fn comments_rejects_word_and_list_together() {
    cit()
        .args(["comments", "-w", "word", "-l", "list"])
        .assert()
        .failure();
}

#[test]
fn cite_archive_without_browser_still_succeeds() {
    let url = "https://yle.fi/uutiset/8672574";
    cit()
        // No browser launcher can be found on an empty PATH.
        .env("PATH", "")
        .args(["cite", "word", "-u", url, "-y", "--no-clipboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("https://web.archive.org/save/{url}")));
}
