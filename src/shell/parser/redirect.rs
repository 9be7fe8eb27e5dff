use std::fs::File;
use std::io::{self, Write};
use std::os::fd::OwnedFd;
use std::path::Path;

use log::{debug, warn};

use super::ast::InputSource;
use super::lexer::is_separator;

const INPUT_MARKER: char = '<';

/// Removes the first `< file` redirection from `line`.
///
/// Returns the line with the marker and its target overwritten by spaces, plus the
/// target name. Only the first `<` is looked at. A marker with nothing after it is
/// still blanked out but yields no target.
pub fn split_redirect(line: &str) -> (String, Option<String>) {
    let Some(start) = line.find(INPUT_MARKER) else {
        return (line.to_string(), None);
    };

    let rest = &line[start + INPUT_MARKER.len_utf8()..];
    let name_start = rest
        .char_indices()
        .find(|&(_, c)| !is_separator(c))
        .map_or(rest.len(), |(i, _)| i);
    let name_len = rest[name_start..]
        .char_indices()
        .find(|&(_, c)| is_separator(c))
        .map_or(rest.len() - name_start, |(i, _)| i);

    let target = &rest[name_start..name_start + name_len];
    let end = start + INPUT_MARKER.len_utf8() + name_start + name_len;

    let mut blanked = String::with_capacity(line.len());
    blanked.push_str(&line[..start]);
    blanked.extend(std::iter::repeat(' ').take(line[start..end].chars().count()));
    blanked.push_str(&line[end..]);

    let target = (!target.is_empty()).then(|| target.to_string());
    (blanked, target)
}

pub fn open_input(target: &Path) -> io::Result<OwnedFd> {
    Ok(File::open(target)?.into())
}

/// Scans `line` for an input redirection and opens its target read-only.
///
/// An open failure is reported on `err` and leaves the input inherited; the command
/// still runs.
pub fn scan_input(line: &str, err: &mut dyn Write) -> (String, InputSource) {
    let (line, target) = split_redirect(line);
    let Some(target) = target else {
        return (line, InputSource::Inherit);
    };

    match open_input(Path::new(&target)) {
        Ok(fd) => {
            debug!("重定向标准输入: {}", target);
            (line, InputSource::File(fd))
        }
        Err(e) => {
            warn!("无法打开重定向文件 {}: {}", target, e);
            let _ = writeln!(err, "sish: {}: {}", target, e);
            (line, InputSource::Inherit)
        }
    }
}
