//! Interactive line prompts (echoed, not masked).

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

/// Print `label`, read one line, and return it without the line ending.
/// Fails on end of input or an empty answer.
pub fn prompt_line<R: BufRead, W: Write>(label: &str, input: &mut R, out: &mut W) -> Result<String> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    let n = input.read_line(&mut line).context("read from stdin")?;
    if n == 0 {
        bail!("no input for {:?}", label.trim().trim_end_matches(':'));
    }
    let value = line.trim_end_matches(['\r', '\n']).to_string();
    if value.is_empty() {
        bail!("empty input for {:?}", label.trim().trim_end_matches(':'));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_line_without_newline() {
        let mut input = Cursor::new("me@example.com\r\nsecond\n");
        let mut out = Vec::new();
        let v = prompt_line("Enter email: ", &mut input, &mut out).unwrap();
        assert_eq!(v, "me@example.com");
        assert_eq!(out, b"Enter email: ");
        let v = prompt_line("Enter password: ", &mut input, &mut out).unwrap();
        assert_eq!(v, "second");
    }

    #[test]
    fn keeps_inner_spaces() {
        let mut input = Cursor::new(" pass word \n");
        let v = prompt_line("p: ", &mut input, &mut Vec::new()).unwrap();
        assert_eq!(v, " pass word ");
    }

    #[test]
    fn eof_and_empty_are_errors() {
        assert!(prompt_line("x: ", &mut Cursor::new(""), &mut Vec::new()).is_err());
        assert!(prompt_line("x: ", &mut Cursor::new("\n"), &mut Vec::new()).is_err());
    }
}
