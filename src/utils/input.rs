use std::io;
use std::io::{BufRead, ErrorKind, Write};

/// Prints `prompt` and reads one line from stdin. `None` on end of input.
pub fn input(prompt: &str) -> Option<String> {
    read_prompted(&mut io::stdin().lock(), &mut io::stdout(), prompt)
}

/// Prompts on `out` and reads a line from `reader`. Lines that are not
/// valid UTF-8 are dropped and the prompt is shown again.
pub fn read_prompted<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    prompt: &str,
) -> Option<String> {
    loop {
        write!(out, "{}", prompt).ok();
        out.flush().ok();

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => return None,
            Ok(_) => return Some(line),
            Err(err) if matches!(err.kind(), ErrorKind::InvalidData | ErrorKind::Interrupted) => {
                log::warn!("ignoring unreadable input: {}", err);
            }
            Err(err) => {
                log::error!("failed to read input: {}", err);
                return None;
            }
        }
    }
}

pub fn input_trim(prompt: &str) -> Option<String> {
    input(prompt).map(|line| line.trim().to_string())
}

/// Splits a shell line into a command word and the rest of the line.
pub fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let mut reader = io::Cursor::new(b"\xff\xfe\nadd 20540\n".to_vec());
        let mut out = Vec::new();
        assert_eq!(read_prompted(&mut reader, &mut out, "> ").as_deref(), Some("add 20540\n"));
        assert_eq!(String::from_utf8(out).unwrap(), "> > ");
        assert_eq!(read_prompted(&mut reader, &mut Vec::new(), "> "), None);
    }

    #[test]
    fn split_command_separates_arguments() {
        assert_eq!(split_command("  add  20540 "), ("add", "20540"));
        assert_eq!(split_command("cell 2 3"), ("cell", "2 3"));
        assert_eq!(split_command("show"), ("show", ""));
        assert_eq!(split_command(""), ("", ""));
    }
}
