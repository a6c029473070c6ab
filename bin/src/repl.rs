use std::io::{BufRead, Write};

use interpreter::{parse_source, run_source, InterpretError};
use scanner::Scanner;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Run,
    Tokens,
    Ast,
}

/// Reads `input` line by line until end of input. Each line is handled on its own, so an
/// error in one line never affects the next.
pub fn run_prompt(
    mut input: impl BufRead,
    mut out: impl Write,
    mut err: impl Write,
    mode: Mode,
) -> anyhow::Result<()> {
    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        match mode {
            Mode::Run => match run_source(&line, &mut out) {
                Ok(()) => (),
                Err(InterpretError::Io(e)) => return Err(e.into()),
                Err(e) => writeln!(err, "{e}")?,
            },
            Mode::Tokens => {
                let (tokens, errors) = Scanner::new(&line).scan_tokens();
                for error in errors {
                    writeln!(err, "{error}")?;
                }
                for token in tokens {
                    writeln!(out, "{token}")?;
                }
            }
            Mode::Ast => match parse_source(&line) {
                Ok(stmts) => {
                    for stmt in stmts {
                        writeln!(out, "{stmt}")?;
                    }
                }
                Err(errors) => writeln!(err, "{errors}")?,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn prompt(input: &str, mode: Mode) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_prompt(input.as_bytes(), &mut out, &mut err, mode).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn runs_every_line() {
        let (out, err) = prompt("print 1 + 2;\nprint \"a\" + 1;\n", Mode::Run);
        assert_eq!(out, "> 3\n> a1\n> \n");
        assert_eq!(err, "");
    }

    #[test]
    fn bad_line_does_not_affect_later_lines() {
        let (out, err) = prompt("print (1;\nprint 1 / 0;\nprint @;\nprint 2;\n", Mode::Run);
        assert_eq!(out, "> > > > 2\n> \n");
        assert_eq!(
            err,
            "[line 1] Error at ';': Expect ')' after expression.\n\
             [line 1] Error: Division by zero.\n\
             [line 1] Error: Unexpected character.\n\
             [line 1] Error at ';': Expect expression.\n"
        );
    }

    #[test]
    fn last_line_without_newline() {
        let (out, _) = prompt("print 4.0;", Mode::Run);
        assert_eq!(out, "> 4\n> \n");
    }

    #[test]
    fn token_dump() {
        let (out, err) = prompt("print 1.5 != \"s\";\n", Mode::Tokens);
        assert_eq!(
            out,
            "> PRINT print \nNUMBER 1.5 1.5\nBANG_EQUAL != \nSTRING \"s\" s\nSEMICOLON ; \nEOF  \n> \n"
        );
        assert_eq!(err, "");

        let (out, err) = prompt("1 $ 2\n", Mode::Tokens);
        assert_eq!(out, "> NUMBER 1 1.0\nNUMBER 2 2.0\nEOF  \n> \n");
        assert_eq!(err, "[line 1] Error: Unexpected character.\n");
    }

    #[test]
    fn ast_dump() {
        let (out, err) = prompt("print -1 + 2 * 3; (1);\n1 +;\n", Mode::Ast);
        assert_eq!(out, "> (print (+ (- 1) (* 2 3)))\n(expr (group 1))\n> > \n");
        assert_eq!(err, "[line 1] Error at ';': Expect expression.\n");
    }
}
