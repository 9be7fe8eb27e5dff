use argh::FromArgs;
use log::{debug, error};
use std::env;
use std::process;

use crate::shell::executor::SystemEnvironment;
use crate::shell::{signals, Shell};
use crate::utils::config::Config;
use crate::utils::log::init_logger;
use crate::utils::path::{basename, export_shell};

mod shell;
mod utils;

#[derive(FromArgs, Debug, PartialEq)]
/// A simple line-oriented command interpreter.
struct Args {
    /// echo each input line, prefixed with '+', before running it
    #[argh(switch, short = 'x')]
    trace: bool,

    /// run a single command line and exit with its status
    #[argh(option, short = 'c')]
    command: Option<String>,
}

fn usage(program: &str) -> String {
    format!("usage: {} [-x] [-c command]", program)
}

/// Rewrites getopt-style short flags (`-xc cmd`, `-ccmd`, a repeated `-c`) into the
/// separate `-x` and `-c cmd` arguments `Args` accepts. Long options, operands and
/// unknown letters are errors.
fn expand_short_flags(args: &[String]) -> Result<Vec<String>, String> {
    let mut trace = false;
    let mut command = None;
    let mut rest = args.iter();

    while let Some(arg) = rest.next() {
        if arg == "--" {
            if let Some(operand) = rest.next() {
                return Err(format!("unexpected operand: {}", operand));
            }
            break;
        }
        let Some(cluster) = arg.strip_prefix('-').filter(|c| !c.is_empty()) else {
            return Err(format!("unexpected operand: {}", arg));
        };
        for (i, flag) in cluster.char_indices() {
            match flag {
                'x' => trace = true,
                'c' => {
                    let attached = &cluster[i + 1..];
                    command = Some(if attached.is_empty() {
                        rest.next()
                            .ok_or_else(|| String::from("option requires an argument -- c"))?
                            .clone()
                    } else {
                        attached.to_string()
                    });
                    break;
                }
                other => return Err(format!("illegal option -- {}", other)),
            }
        }
    }

    let mut expanded = Vec::new();
    if trace {
        expanded.push(String::from("-x"));
    }
    if let Some(command) = command {
        expanded.push(String::from("-c"));
        expanded.push(command);
    }
    Ok(expanded)
}

/// Any rejection, help requests included, comes back as the message to print
/// above the usage line.
fn parse_args(program: &str, args: &[String]) -> Result<Args, String> {
    let expanded = expand_short_flags(args)?;
    let expanded: Vec<&str> = expanded.iter().map(String::as_str).collect();
    Args::from_args(&[program], &expanded).map_err(|early| early.output)
}

fn main() {
    let argv: Vec<String> = env::args().collect();
    let program = argv
        .first()
        .map(|arg0| basename(arg0).into_owned())
        .unwrap_or_else(|| String::from("sish"));

    let args = match parse_args(&program, argv.get(1..).unwrap_or_default()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}: {}", program, message);
            eprintln!("{}", usage(&program));
            process::exit(1);
        }
    };

    let config = Config::new();
    init_logger(&config);
    debug!("配置加载成功 {}", config.config_dir.display());

    if let Err(e) = signals::ignore_job_control() {
        error!("无法忽略信号: {}", e);
        eprintln!("{}: sigaction: {}", program, e);
        process::exit(1);
    }

    if let Err(e) = export_shell() {
        error!("无法设置 SHELL: {}", e);
        eprintln!("{}: SHELL: {}", program, e);
        process::exit(1);
    }

    let mut shell = Shell::new(&config, Box::new(SystemEnvironment), args.trace);
    let status = match args.command {
        Some(command) => shell.run_single(&command),
        None => shell.run(),
    };

    debug!("退出 sish，状态 {}", status);
    process::exit(status);
}
