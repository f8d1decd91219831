//! Token grammar a plugin uses to describe its context.
//!
//! ```text
//! definition  := header item*
//! header      := "--long" DESC | "-X" DESC | "-X" "--long" DESC
//! item        := sub_context | flag
//! sub_context := "-X" ["--long"] DESC flag*      (ends at the next "-X" or end)
//! flag        := ["-x"] ["--long"] [ARG] DESC    (at least one name)
//! ```
//!
//! Whether a flag carries an argument name is decided by how many non-flag
//! tokens follow its names: two or more means `ARG DESC`, one means `DESC`.

use crate::context::{is_context_letter, ContextNode, Flag};
use crate::error::DefinitionError;
use std::path::{Path, PathBuf};

/// Parse a complete context definition.
///
/// `script` is stamped onto the root and every sub-context so they can be
/// dispatched later.
pub fn parse_definition<S: AsRef<str>>(
    tokens: &[S],
    script: Option<&Path>,
) -> Result<ContextNode, DefinitionError> {
    let tokens: Vec<&str> = tokens.iter().map(|token| token.as_ref()).collect();
    let mut parser = DefinitionParser {
        tokens: &tokens,
        pos: 0,
        script: script.map(Path::to_path_buf),
    };
    parser.parse_root()
}

struct DefinitionParser<'a> {
    tokens: &'a [&'a str],
    pos: usize,
    script: Option<PathBuf>,
}

impl<'a> DefinitionParser<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn parse_root(&mut self) -> Result<ContextNode, DefinitionError> {
        if self.tokens.is_empty() {
            return Err(DefinitionError::Empty);
        }
        let mut root = self.parse_header()?;

        while let Some(token) = self.peek() {
            if context_token(token).is_some() {
                let child = self.parse_sub_context()?;
                root.sub_contexts.insert(child.letter, child.into());
            } else {
                let flag = self.parse_flag()?;
                root.flags.push(flag);
            }
        }

        Ok(root)
    }

    fn parse_sub_context(&mut self) -> Result<ContextNode, DefinitionError> {
        let mut node = self.parse_header()?;
        while let Some(token) = self.peek() {
            if context_token(token).is_some() {
                break;
            }
            let flag = self.parse_flag()?;
            node.flags.push(flag);
        }
        Ok(node)
    }

    fn parse_header(&mut self) -> Result<ContextNode, DefinitionError> {
        let first = self.next().ok_or(DefinitionError::Empty)?;

        let (letter, long, description) = if let Some(long) = first.strip_prefix("--") {
            let description = self
                .next()
                .ok_or_else(|| DefinitionError::MissingDescription(first.to_string()))?;
            let letter = long
                .chars()
                .next()
                .map(|ch| ch.to_ascii_uppercase())
                .ok_or(DefinitionError::MissingContextName)?;
            if !is_context_letter(letter) {
                return Err(DefinitionError::InvalidContextLetter(format!("-{}", letter)));
            }
            (letter, long.to_string(), description)
        } else if let Some(ch) = single_dash_char(first) {
            if !is_context_letter(ch) {
                return Err(DefinitionError::InvalidContextLetter(first.to_string()));
            }
            let second = self
                .next()
                .ok_or_else(|| DefinitionError::MissingDescription(first.to_string()))?;
            match second.strip_prefix("--") {
                Some(long) => {
                    let description = self.next().ok_or_else(|| {
                        DefinitionError::MissingDescription(format!("{} {}", first, second))
                    })?;
                    let long = if long.is_empty() {
                        ch.to_ascii_lowercase().to_string()
                    } else {
                        long.to_string()
                    };
                    (ch, long, description)
                }
                None => (ch, ch.to_ascii_lowercase().to_string(), second),
            }
        } else {
            return Err(DefinitionError::ExpectedContextHeader(first.to_string()));
        };

        let mut node = ContextNode::new(letter, long, description);
        node.script = self.script.clone();
        Ok(node)
    }

    fn parse_flag(&mut self) -> Result<Flag, DefinitionError> {
        let start = self.peek().unwrap_or_default();

        let mut short = None;
        if let Some(ch) = self.peek().and_then(single_dash_char) {
            if ch.is_ascii_lowercase() {
                short = Some(ch);
                self.pos += 1;
            }
        }

        let mut long = None;
        if let Some(name) = self.peek().and_then(|t| t.strip_prefix("--")) {
            self.pos += 1;
            if !name.is_empty() {
                long = Some(name.to_string());
            }
        }

        if short.is_none() && long.is_none() {
            return Err(DefinitionError::FlagWithoutName(start.to_string()));
        }

        let trailing = self.tokens[self.pos..]
            .iter()
            .take_while(|token| !token.starts_with('-'))
            .count();

        let mut flag = Flag {
            short,
            long,
            arg_name: None,
            description: String::new(),
        };
        match trailing {
            0 => {
                return Err(DefinitionError::FlagWithoutDescription(flag.display_name()));
            }
            1 => {
                flag.description = self.next().unwrap_or_default().to_string();
            }
            _ => {
                flag.arg_name = self.next().map(str::to_string);
                flag.description = self.next().unwrap_or_default().to_string();
            }
        }
        Ok(flag)
    }
}

/// `-X` with an uppercase letter: starts a context header.
fn context_token(token: &str) -> Option<char> {
    single_dash_char(token).filter(|ch| is_context_letter(*ch))
}

/// `-c`: a single dash followed by exactly one character.
fn single_dash_char(token: &str) -> Option<char> {
    let rest = token.strip_prefix('-')?;
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch != '-' => Some(ch),
        _ => None,
    }
}
