use log::{debug, error, info, warn};
use std::io::{self, IsTerminal, Write};

use crate::shell::executor::{launch, Builtin, Environment, Outcome};
use crate::shell::parser::parse_line;
use crate::shell::readline::{BufferedLines, LineSource, ReadOutcome, ReadlineManager};
use crate::utils::config::Config;
use crate::utils::theme::Theme;

const TRACE_PREFIX: char = '+';

/// Whether the loop keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<'a> {
    config: &'a Config,
    theme: Theme,
    env: Box<dyn Environment>,
    status: i32,
    trace: bool,
}

impl<'a> Shell<'a> {
    pub fn new(config: &'a Config, env: Box<dyn Environment>, trace: bool) -> Self {
        Self {
            config,
            theme: Theme::plain(),
            env,
            status: 0,
            trace,
        }
    }

    /// Exit status of the last command that ran.
    pub fn status(&self) -> i32 {
        self.status
    }

    /// Runs one command line, as for `-c`, and returns its status.
    pub fn run_single(&mut self, line: &str) -> i32 {
        debug!("单次执行: {}", line);
        self.execute_line(line, &mut io::stdout(), &mut io::stderr());
        self.status()
    }

    /// Reads and runs lines from stdin until `exit` or end of input.
    pub fn run(&mut self) -> i32 {
        let interactive = io::stdin().is_terminal();
        self.theme = Theme::load_theme(interactive);
        let mut out = io::stdout();
        let mut err = io::stderr();

        if interactive {
            match ReadlineManager::new(self.config) {
                Ok(mut readline) => {
                    readline.load_history();
                    let status = self.run_loop(&mut readline, &mut out, &mut err);
                    readline.save_history();
                    return status;
                }
                Err(e) => warn!("无法初始化 readline，改用标准输入: {}", e),
            }
        }

        let mut lines = BufferedLines::new(io::stdin().lock());
        self.run_loop(&mut lines, &mut out, &mut err)
    }

    pub fn run_loop(
        &mut self,
        source: &mut dyn LineSource,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> i32 {
        info!("sish 准备就绪");
        let prompt = (self.theme.prompt_style)(&self.config.prompt);

        loop {
            match source.read_line(&prompt, out) {
                Ok(ReadOutcome::Line(line)) => {
                    if !line.trim().is_empty() {
                        source.add_history(&line);
                    }
                    if self.execute_line(&line, out, err) == Flow::Exit {
                        debug!("exit: 最终状态 {}", self.status);
                        break;
                    }
                }
                Ok(ReadOutcome::Interrupted) => {
                    let _ = writeln!(out);
                }
                Ok(ReadOutcome::Eof) => {
                    debug!("接收到 EOF，退出 sish...");
                    break;
                }
                Err(e) => {
                    error!("读取输入失败: {}", e);
                    let _ = writeln!(err, "sish: {}", e);
                    break;
                }
            }
        }

        let _ = out.flush();
        self.status()
    }

    /// One pass of the pipeline: redirect scan, tokenize, then builtin or launch.
    ///
    /// A redirected input file stays open only for the duration of this call.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write, err: &mut dyn Write) -> Flow {
        if self.trace {
            let traced = format!("{}{}", TRACE_PREFIX, line.trim_end_matches('\n'));
            let _ = writeln!(out, "{}", (self.theme.trace_style)(&traced));
        }

        let info = parse_line(line, err);
        let Some(program) = info.program() else {
            return Flow::Continue;
        };

        match Builtin::lookup(program) {
            Some(builtin) => {
                match builtin.run(info.arguments(), self.status, &mut *self.env, out, err) {
                    Outcome::Status(status) => self.status = status,
                    Outcome::Exit => return Flow::Exit,
                }
            }
            None => {
                // The child shares our stdout; anything still buffered goes first.
                let _ = out.flush();
                self.status = launch(&info, err);
            }
        }

        debug!(
            "命令 {} ({} 个参数) 返回状态 {}",
            program,
            info.token_count(),
            self.status
        );
        Flow::Continue
    }
}
