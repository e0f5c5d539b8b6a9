use std::{
    io::{self, BufRead, Write},
    process::{Command, Stdio},
};

use anyhow::{Context, bail};
use tracing::debug;

// Clipboard tools to try, in order, with their arguments.
#[cfg(target_os = "macos")]
static CLIPBOARD_PROGRAMS: &[(&str, &[&str])] = &[("pbcopy", &[])];
#[cfg(windows)]
static CLIPBOARD_PROGRAMS: &[(&str, &[&str])] = &[("clip", &[])];
#[cfg(not(any(target_os = "macos", windows)))]
static CLIPBOARD_PROGRAMS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Put `text` on the system clipboard by piping it into the platform's clipboard tool.
pub fn copy_to_clipboard(text: &str) -> anyhow::Result<()> {
    pipe_to_first(CLIPBOARD_PROGRAMS, text)
}

// Feed `text` to each program in turn until one of them takes it and exits cleanly.
fn pipe_to_first(programs: &[(&str, &[&str])], text: &str) -> anyhow::Result<()> {
    for (program, args) in programs {
        let child = Command::new(program)
            .args(*args)
            .env("LANG", "en_US.UTF-8")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let mut child = match child {
            Ok(child) => child,
            Err(e) => {
                debug!(%program, error = %e, "clipboard program unavailable");
                continue;
            }
        };
        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(text.as_bytes())
        {
            debug!(%program, error = %e, "clipboard program stopped reading");
            drop(stdin);
            if let Err(e) = child.wait() {
                debug!(%program, error = %e, "could not reap clipboard program");
            }
            continue;
        }
        let status = child.wait().with_context(|| format!("{program} did not finish"))?;
        if status.success() {
            return Ok(());
        }
        debug!(%program, %status, "clipboard program failed");
    }
    bail!("no clipboard program available on this platform")
}

/// Open `url` in a new browser tab, if there's a browser to open it in.
pub fn open_in_browser(url: &str) -> anyhow::Result<()> {
    let mut cmd = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else {
        Command::new("xdg-open")
    };
    let status = cmd
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("failed to launch a browser")?;
    if !status.success() {
        bail!("browser launcher exited with {status}");
    }
    Ok(())
}

/// Ask a yes/no question on `output` and read the answer from `input`.
///
/// An empty answer, or no answer at all (end of input), picks `default`. Without a default the
/// question is repeated until answered, and end of input means no.
pub fn confirm<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    question: &str,
    default: Option<bool>,
) -> io::Result<bool> {
    let prompt = match default {
        None => " [y/n] ",
        Some(true) => " [Y/n] ",
        Some(false) => " [y/N] ",
    };
    loop {
        write!(output, "{question}{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(default.unwrap_or(false));
        }
        match line.trim().to_lowercase().as_str() {
            "" if default.is_some() => return Ok(default.unwrap_or(false)),
            "yes" | "ye" | "y" => return Ok(true),
            "no" | "n" => return Ok(false),
            _ => writeln!(output, "Please respond with 'yes' or 'no' (or 'y' or 'n').")?,
        }
    }
}
