pub mod ast;
pub mod lexer;
pub mod redirect;

use std::io::Write;

pub use ast::CommandInfo;

/// Turns one raw input line into a command: the input redirection is pulled out and
/// opened first, then the remaining text is split into words.
pub fn parse_line(line: &str, err: &mut dyn Write) -> CommandInfo {
    let (line, input) = redirect::scan_input(line, err);
    CommandInfo::new(lexer::tokenize(&line), input)
}
