#![allow(clippy::unwrap_used)]

use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("sish-cli-{}-{}", std::process::id(), name));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn sish(home: &PathBuf) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sish"));
    cmd.env("HOME", home)
        .env_remove("SISH_PROMPT")
        .env_remove("SISH_LOG_LEVEL")
        .env_remove("SISH_LOG_DIR")
        .env_remove("SISH_HISTORY");
    cmd
}

fn run_script(name: &str, script: &str) -> Output {
    let home = scratch_dir(name);
    let mut child = sish(&home)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn single_command_echo() {
    let home = scratch_dir("single");
    let output = sish(&home).args(["-c", "echo hi"]).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "hi\n");
}

#[test]
fn single_command_status() {
    let home = scratch_dir("single-status");
    let output = sish(&home).args(["-c", "sh -c false"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn single_command_trace() {
    let home = scratch_dir("trace");
    let output = sish(&home).args(["-x", "-c", "echo hi"]).output().unwrap();
    assert_eq!(stdout(&output), "+echo hi\nhi\n");
}

#[test]
fn unknown_flag_prints_usage() {
    let home = scratch_dir("usage");
    let output = sish(&home).arg("-z").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("usage: sish [-x] [-c command]"));
    assert!(output.stdout.is_empty());
}

#[test]
fn loop_prompts_and_runs_lines() {
    let output = run_script("loop", "echo one\necho two\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "sish> one\nsish> two\nsish> ");
}

#[test]
fn exit_keeps_last_status() {
    let output = run_script("exit", "false\nexit\necho unreachable\n");
    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("unreachable"));
}

#[test]
fn eof_keeps_last_status() {
    let output = run_script("eof", "true\nsh -c false\n");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn unknown_command_reports_and_continues() {
    let output = run_script("unknown", "sish-no-such-command-xyz\necho $?\n");
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("127\n"));
    assert!(stderr(&output).contains("sish-no-such-command-xyz: command not found"));
}

#[test]
fn input_redirection_feeds_child() {
    let dir = scratch_dir("redirect");
    let file = dir.join("input.txt");
    fs::write(&file, "from the file\n").unwrap();

    let output = run_script("redirect-run", &format!("< {} cat\necho $?\n", file.display()));
    assert_eq!(stdout(&output), "sish> from the file\nsish> 0\nsish> ");
}

#[test]
fn missing_redirect_file_still_runs() {
    let output = run_script("missing", "< /nonexistent/sish/in.txt echo ran\n");
    assert_eq!(stdout(&output), "sish> ran\nsish> ");
    assert!(stderr(&output).contains("/nonexistent/sish/in.txt"));
}

#[test]
fn cd_changes_directory_for_children() {
    let dir = scratch_dir("cd").canonicalize().unwrap();
    let output = run_script("cd-run", &format!("cd {}\npwd\ncd a b\necho $?\n", dir.display()));
    assert_eq!(
        stdout(&output),
        format!("sish> sish> {}\nsish> sish> 1\nsish> ", dir.display())
    );
    assert!(stderr(&output).contains("cd: too many arguments"));
}

#[test]
fn shell_variable_points_at_interpreter() {
    let home = scratch_dir("shell-var");
    let output = sish(&home).args(["-c", "printenv SHELL"]).output().unwrap();
    let expected = PathBuf::from(env!("CARGO_BIN_EXE_sish")).canonicalize().unwrap();
    assert_eq!(stdout(&output).trim_end(), expected.display().to_string());
}

#[test]
fn help_and_long_options_print_usage() {
    let home = scratch_dir("help");
    for args in [&["--help"][..], &["help"], &["-h"], &["--trace", "--command", "echo hi"]] {
        let output = sish(&home).args(args).output().unwrap();
        assert_eq!(output.status.code(), Some(1), "{:?}", args);
        assert!(stderr(&output).contains("usage: sish [-x] [-c command]"));
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn clustered_short_flags() {
    let home = scratch_dir("cluster");
    let output = sish(&home).args(["-xc", "echo hi"]).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "+echo hi\nhi\n");

    let output = sish(&home).arg("-cecho attached").output().unwrap();
    assert_eq!(stdout(&output), "attached\n");
}

#[test]
fn job_control_signals_do_not_kill_interpreter() {
    let dir = scratch_dir("signals");
    let script = dir.join("signal-parent.sh");
    fs::write(&script, "kill -INT $PPID\nkill -QUIT $PPID\nexit 3\n").unwrap();

    let output = sish(&dir)
        .args(["-c", &format!("sh {}", script.display())])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let output = run_script("signals-loop", &format!("sh {}\necho after\n", script.display()));
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("after\n"));
}

#[test]
fn redirect_descriptor_is_closed_after_command() {
    let dir = scratch_dir("fd-leak");
    let input = dir.join("input.txt");
    let count = dir.join("list-fds.sh");
    let before = dir.join("before.txt");
    let after = dir.join("after.txt");
    fs::write(&input, "line\n").unwrap();
    fs::write(&count, "ls /proc/$PPID/fd > \"$1\"\n").unwrap();

    let redirect = format!("< {} cat\n", input.display());
    let script = format!(
        "sh {count} {before}\n{redirect}{redirect}{redirect}sh {count} {after}\n",
        count = count.display(),
        before = before.display(),
        after = after.display(),
        redirect = redirect,
    );
    let output = run_script("fd-leak-run", &script);
    assert_eq!(output.status.code(), Some(0));

    let before = fs::read_to_string(&before).unwrap();
    assert!(!before.is_empty());
    assert_eq!(before, fs::read_to_string(&after).unwrap());
}
