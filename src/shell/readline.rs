use crate::utils::config::Config;
use log::{debug, error, warn};
pub use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::Editor;
use rustyline::{CompletionType, Config as RLConfig};
use std::fs;
use std::io::{self, BufRead, Write};

/// Result of asking for one more line.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    Interrupted,
    Eof,
}

/// Somewhere the command loop can pull lines from.
pub trait LineSource {
    /// Shows `prompt` (on `out` if the source does not draw it itself) and reads a
    /// line without its trailing newline.
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> io::Result<ReadOutcome>;

    fn add_history(&mut self, _line: &str) {}
}

/// Line editor with history, used when stdin is a terminal.
pub struct ReadlineManager<'a> {
    config: &'a Config,
    editor: Editor<(), FileHistory>,
}

impl<'a> ReadlineManager<'a> {
    pub fn new(config: &'a Config) -> Result<Self, ReadlineError> {
        let rl_config = RLConfig::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(config.get_edit_mode())
            .build();

        let editor = Editor::with_config(rl_config)?;
        Ok(Self { config, editor })
    }

    pub fn load_history(&mut self) {
        if let Some(parent) = self.config.history_file.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!("无法创建历史记录目录: {} {}", parent.display(), err);
            }
        }

        if let Err(err) = self.editor.load_history(&self.config.history_file) {
            warn!(
                "无法加载历史记录: {} {}",
                self.config.history_file.display(),
                err
            );
        } else {
            debug!("历史记录加载成功");
        }
    }

    pub fn save_history(&mut self) {
        if let Err(err) = self.editor.save_history(&self.config.history_file) {
            error!("保存历史记录失败: {}", err);
        } else {
            debug!("历史记录保存成功");
        }
    }
}

impl LineSource for ReadlineManager<'_> {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> io::Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => {
                writeln!(out)?;
                Ok(ReadOutcome::Eof)
            }
            Err(ReadlineError::Io(err)) => Err(err),
            Err(err) => Err(io::Error::new(io::ErrorKind::Other, err.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(err) = self.editor.add_history_entry(line) {
            warn!("无法添加历史记录: {}", err);
        }
    }
}

/// Plain buffered reader for piped or redirected input.
pub struct BufferedLines<R> {
    reader: R,
}

impl<R: BufRead> BufferedLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BufferedLines<R> {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> io::Result<ReadOutcome> {
        out.write_all(prompt.as_bytes())?;
        out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(ReadOutcome::Eof);
        }
        if line.ends_with('\n') {
            line.pop();
        }
        Ok(ReadOutcome::Line(line))
    }
}
