//! Line-directive preprocessor for template and feature fragments.
//!
//! ```text
//! %IF [<|ENV:FEATURES|> CONTAINS <metadata>]:
//! import configparser
//! %ELSE
//! import json
//! %END
//! ```
//!
//! - `%IF [<lhs> OP <rhs>]:` opens a block, `%ELSE` flips it, `%END` closes
//!   it. Blocks nest.
//! - `OP` is `CONTAINS` (membership in a comma-separated list) or `EQUALS`,
//!   either of which may be prefixed with `NOT`.
//! - An operand is either a variable `<|ENV:NAME|>` or a literal `<text>`.
//! - `<|ENV:NAME|>` in an emitted line is replaced by the variable's value.
//!
//! Directive lines are removed from the output. A line is a directive only
//! when it starts (after indentation) with `%` and an upper-case word, so
//! text such as a Makefile's `%.o: %.c` passes through untouched.

use cmaker_core::{
    application::ports::{PreprocessError, Preprocessor},
    domain::Environment,
};

const VARIABLE_OPEN: &str = "<|ENV:";
const VARIABLE_CLOSE: &str = "|>";

/// Default [`Preprocessor`] used by the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectivePreprocessor;

impl DirectivePreprocessor {
    pub fn new() -> Self {
        Self
    }
}

impl Preprocessor for DirectivePreprocessor {
    fn process(&self, source: &str, environment: &Environment) -> Result<String, PreprocessError> {
        let mut output = String::with_capacity(source.len());
        let mut blocks: Vec<Block> = Vec::new();

        for (index, line) in source.split_inclusive('\n').enumerate() {
            let number = index + 1;
            let at = |message: String| PreprocessError::at(number, message);

            match Directive::parse(line).map_err(at)? {
                Some(Directive::If(condition)) => {
                    let enclosing = is_active(&blocks);
                    // Variables are only looked up on a live branch.
                    let taken = enclosing && condition.evaluate(environment).map_err(at)?;
                    blocks.push(Block {
                        opened_at: number,
                        enclosing,
                        taken,
                        in_else: false,
                    });
                }
                Some(Directive::Else) => {
                    let block = blocks
                        .last_mut()
                        .ok_or_else(|| at("%ELSE without a matching %IF".into()))?;
                    if block.in_else {
                        return Err(at(format!(
                            "second %ELSE for the %IF on line {}",
                            block.opened_at
                        )));
                    }
                    block.in_else = true;
                }
                Some(Directive::End) => {
                    blocks
                        .pop()
                        .ok_or_else(|| at("%END without a matching %IF".into()))?;
                }
                None if is_active(&blocks) => {
                    output.push_str(&substitute(line, environment).map_err(at)?);
                }
                None => {}
            }
        }

        if let Some(block) = blocks.last() {
            return Err(PreprocessError::at(
                block.opened_at,
                "%IF without a matching %END",
            ));
        }
        Ok(output)
    }
}

#[derive(Debug)]
struct Block {
    opened_at: usize,
    /// Whether every enclosing block is on its live branch.
    enclosing: bool,
    taken: bool,
    in_else: bool,
}

impl Block {
    fn is_active(&self) -> bool {
        self.enclosing && (self.taken != self.in_else)
    }
}

fn is_active(blocks: &[Block]) -> bool {
    blocks.last().is_none_or(Block::is_active)
}

#[derive(Debug, PartialEq, Eq)]
enum Directive {
    If(Condition),
    Else,
    End,
}

impl Directive {
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let Some(rest) = line.trim().strip_prefix('%') else {
            return Ok(None);
        };

        let word_len = rest.bytes().take_while(u8::is_ascii_uppercase).count();
        if word_len == 0 {
            return Ok(None);
        }
        let (word, tail) = rest.split_at(word_len);
        if !(tail.is_empty() || tail.starts_with(&[' ', '\t', '['][..])) {
            return Ok(None);
        }

        match word {
            "IF" => Condition::parse(tail.trim()).map(|c| Some(Self::If(c))),
            "ELSE" | "END" if !tail.trim().is_empty() => {
                Err(format!("unexpected text after %{word}: '{}'", tail.trim()))
            }
            "ELSE" => Ok(Some(Self::Else)),
            "END" => Ok(Some(Self::End)),
            other => Err(format!("unknown directive %{other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Contains,
    Equals,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Operand {
    Variable(String),
    Literal(String),
}

impl Operand {
    /// Parse one operand off the front of `text`, returning the remainder.
    fn parse(text: &str) -> Result<(Self, &str), String> {
        let text = text.trim_start();

        if let Some(rest) = text.strip_prefix(VARIABLE_OPEN) {
            let end = rest
                .find(VARIABLE_CLOSE)
                .ok_or_else(|| format!("unterminated variable in '{text}'"))?;
            let name = rest[..end].trim();
            if name.is_empty() {
                return Err("empty variable name".into());
            }
            return Ok((
                Self::Variable(name.to_owned()),
                &rest[end + VARIABLE_CLOSE.len()..],
            ));
        }

        if let Some(rest) = text.strip_prefix('<') {
            let end = rest
                .find('>')
                .ok_or_else(|| format!("unterminated literal in '{text}'"))?;
            return Ok((Self::Literal(rest[..end].to_owned()), &rest[end + 1..]));
        }

        Err(format!("expected '<|ENV:NAME|>' or '<value>', found '{text}'"))
    }

    fn value<'a>(&'a self, environment: &'a Environment) -> Result<&'a str, String> {
        match self {
            Self::Variable(name) => lookup(environment, name),
            Self::Literal(text) => Ok(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Condition {
    lhs: Operand,
    negated: bool,
    operator: Operator,
    rhs: Operand,
}

impl Condition {
    /// Parse `[<lhs> [NOT] OP <rhs>]:`.
    fn parse(text: &str) -> Result<Self, String> {
        let body = text
            .strip_suffix(':')
            .map(str::trim_end)
            .and_then(|t| t.strip_prefix('['))
            .and_then(|t| t.strip_suffix(']'))
            .ok_or_else(|| format!("expected '[<lhs> OP <rhs>]:' after %IF, found '{text}'"))?;

        let (lhs, rest) = Operand::parse(body)?;

        let op_end = rest
            .find('<')
            .ok_or_else(|| format!("missing right-hand operand in '{body}'"))?;
        let words: Vec<&str> = rest[..op_end].split_whitespace().collect();
        let (negated, operator) = match words.as_slice() {
            ["CONTAINS"] => (false, Operator::Contains),
            ["EQUALS"] => (false, Operator::Equals),
            ["NOT", "CONTAINS"] => (true, Operator::Contains),
            ["NOT", "EQUALS"] => (true, Operator::Equals),
            _ => {
                return Err(format!(
                    "unknown operator '{}' (expected CONTAINS or EQUALS, optionally after NOT)",
                    words.join(" ")
                ));
            }
        };

        let (rhs, trailing) = Operand::parse(&rest[op_end..])?;
        if !trailing.trim().is_empty() {
            return Err(format!("unexpected text in condition: '{}'", trailing.trim()));
        }

        Ok(Self {
            lhs,
            negated,
            operator,
            rhs,
        })
    }

    fn evaluate(&self, environment: &Environment) -> Result<bool, String> {
        let lhs = self.lhs.value(environment)?;
        let rhs = self.rhs.value(environment)?;

        let holds = match self.operator {
            Operator::Contains => lhs.split(',').map(str::trim).any(|item| item == rhs),
            Operator::Equals => lhs == rhs,
        };
        Ok(holds != self.negated)
    }
}

fn lookup<'a>(environment: &'a Environment, name: &str) -> Result<&'a str, String> {
    environment
        .get(name)
        .ok_or_else(|| format!("unknown variable '{name}'"))
}

/// Replace every `<|ENV:NAME|>` in an emitted line.
fn substitute(line: &str, environment: &Environment) -> Result<String, String> {
    let mut output = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(start) = rest.find(VARIABLE_OPEN) {
        output.push_str(&rest[..start]);
        let after = &rest[start + VARIABLE_OPEN.len()..];
        let end = after
            .find(VARIABLE_CLOSE)
            .ok_or_else(|| "unterminated '<|ENV:' in text".to_owned())?;
        output.push_str(lookup(environment, after[..end].trim())?);
        rest = &after[end + VARIABLE_CLOSE.len()..];
    }

    output.push_str(rest);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(features: &str) -> Environment {
        Environment::new()
            .with(Environment::LANGUAGE, "c++")
            .with(Environment::STANDARD, "23")
            .with(Environment::KIND, "executable")
            .with(Environment::MODE, "common")
            .with(Environment::FEATURES, features)
    }

    fn run(source: &str, features: &str) -> Result<String, PreprocessError> {
        DirectivePreprocessor::new().process(source, &env(features))
    }

    const INSTALL_PY: &str = "\
import os
%IF [<|ENV:FEATURES|> CONTAINS <metadata>]:
import configparser
%END

def main():
    os.system('cmake --install build')
%IF [<|ENV:FEATURES|> CONTAINS <metadata>]:
    install_desktop_metadata()
%END
";

    #[test]
    fn block_is_kept_when_feature_is_selected() {
        let out = run(INSTALL_PY, "installable,metadata").unwrap();
        assert_eq!(
            out,
            "import os\nimport configparser\n\ndef main():\n    os.system('cmake --install build')\n    install_desktop_metadata()\n"
        );
    }

    #[test]
    fn block_is_dropped_when_feature_is_absent() {
        let out = run(INSTALL_PY, "installable").unwrap();
        assert!(!out.contains("configparser"));
        assert!(!out.contains("install_desktop_metadata"));
        assert!(!out.contains('%'));
    }

    #[test]
    fn contains_matches_whole_items_only() {
        let src = "%IF [<|ENV:FEATURES|> CONTAINS <meta>]:\nyes\n%END\n";
        assert_eq!(run(src, "metadata").unwrap(), "");
        assert_eq!(run(src, "a, meta ,b").unwrap(), "yes\n");
    }

    #[test]
    fn else_branch_and_not_operator() {
        let src = "\
%IF [<|ENV:LANGUAGE|> NOT EQUALS <c>]:
set(CMAKE_CXX_STANDARD <|ENV:STANDARD|>)
%ELSE
set(CMAKE_C_STANDARD <|ENV:STANDARD|>)
%END
";
        assert_eq!(run(src, "").unwrap(), "set(CMAKE_CXX_STANDARD 23)\n");
    }

    #[test]
    fn nested_blocks_respect_the_outer_branch() {
        let src = "\
%IF [<|ENV:MODE|> EQUALS <gui>]:
%IF [<|ENV:FEATURES|> CONTAINS <themes>]:
gui-themes
%END
gui
%ELSE
%IF [<|ENV:FEATURES|> CONTAINS <themes>]:
themed
%ELSE
plain
%END
%END
";
        assert_eq!(run(src, "themes").unwrap(), "themed\n");
        assert_eq!(run(src, "").unwrap(), "plain\n");
    }

    #[test]
    fn inactive_branch_does_not_look_up_variables() {
        let src = "%IF [<a> EQUALS <b>]:\n%IF [<|ENV:MISSING|> EQUALS <x>]:\n%END\n%END\nok\n";
        assert_eq!(run(src, "").unwrap(), "ok\n");
    }

    #[test]
    fn literal_only_text_is_untouched() {
        let src = "%.o: %.c\n\t$(CC) -c $<\n100% done\nfmt = '%s'\n";
        assert_eq!(run(src, "").unwrap(), src);
    }

    #[test]
    fn crlf_directives_are_recognised() {
        let src = "a\r\n%IF [<x> EQUALS <x>]:\r\nb\r\n%END\r\n";
        assert_eq!(run(src, "").unwrap(), "a\r\nb\r\n");
    }

    #[test]
    fn unmatched_end_reports_its_line() {
        let err = run("a\nb\n%END\n", "").unwrap_err();
        assert_eq!(err.line, Some(3));
    }

    #[test]
    fn unclosed_if_reports_the_opening_line() {
        let err = run("a\n%IF [<x> EQUALS <x>]:\nb\n", "").unwrap_err();
        assert_eq!(err.line, Some(2));
        assert!(err.message.contains("%END"));
    }

    #[test]
    fn second_else_is_an_error() {
        let err = run("%IF [<x> EQUALS <x>]:\n%ELSE\n%ELSE\n%END\n", "").unwrap_err();
        assert_eq!(err.line, Some(3));
    }

    #[test]
    fn unknown_variable_is_an_error() {
        let err = run("%IF [<|ENV:NOPE|> EQUALS <x>]:\n%END\n", "").unwrap_err();
        assert_eq!(err.line, Some(1));
        assert!(err.message.contains("NOPE"));

        let err = run("name: <|ENV:NOPE|>\n", "").unwrap_err();
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn unknown_directive_is_an_error() {
        let err = run("%INCLUDE other.txt\n", "").unwrap_err();
        assert!(err.message.contains("%INCLUDE"));
    }

    #[test]
    fn malformed_conditions_are_errors() {
        for src in [
            "%IF <x> EQUALS <x>\n%END\n",
            "%IF [<x> EQUALS <x>]\n%END\n",
            "%IF [<x> MATCHES <x>]:\n%END\n",
            "%IF [<x> EQUALS]:\n%END\n",
            "%IF [<x> EQUALS <x> <y>]:\n%END\n",
            "%IF [<|ENV:FEATURES EQUALS <x>]:\n%END\n",
        ] {
            let err = run(src, "").unwrap_err();
            assert_eq!(err.line, Some(1), "{src}");
        }
    }

    #[test]
    fn output_without_trailing_newline_is_preserved() {
        assert_eq!(run("<|ENV:LANGUAGE|>", "").unwrap(), "c++");
    }
}
