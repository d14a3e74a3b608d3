//! getopt_long-style scanning of the command line.
//!
//! Supports `--name`, `--name=value`, clustered short flags (`-lr`), short
//! flags with attached (`-jfile`) or detached (`-j file`) arguments, `--` as
//! the end of options, and operands anywhere on the line.

use std::collections::VecDeque;

use super::resolver::{Code, Resolved, ResolvedOption};
use super::table::{Arity, OptionSpec, OptionTable};
use crate::error::Result;

/// Cursor over the command-line arguments, program name excluded.
#[derive(Debug, Default)]
pub struct ArgScanner {
    args: VecDeque<String>,
    /// Unconsumed characters of the current short-flag cluster.
    cluster: VecDeque<char>,
    options_ended: bool,
}

impl ArgScanner {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            cluster: VecDeque::new(),
            options_ended: false,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cluster.is_empty() && self.args.is_empty()
    }

    /// Resolves the next command-line item, or `None` once every token is used.
    pub fn next(&mut self, table: &OptionTable) -> Option<Result<Resolved>> {
        if let Some(short) = self.cluster.pop_front() {
            return Some(self.short(table, short));
        }
        let token = self.args.pop_front()?;
        if self.options_ended || token == "-" || !token.starts_with('-') {
            return Some(Ok(Resolved::Operand(token)));
        }
        if token == "--" {
            self.options_ended = true;
            return self.next(table);
        }
        if let Some(long) = token.strip_prefix("--") {
            return Some(self.long(table, long));
        }
        self.cluster.extend(token.chars().skip(1));
        let short = self.cluster.pop_front()?;
        Some(self.short(table, short))
    }

    fn long(&mut self, table: &OptionTable, body: &str) -> Result<Resolved> {
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value.to_owned())),
            None => (body, None),
        };
        let Some(spec) = table.find_long(name) else {
            return Ok(unknown(format!("--{name}")));
        };
        let argument = match (spec.arity, inline) {
            (Arity::Required, None) => self.args.pop_front(),
            (_, inline) => inline,
        };
        known(spec, argument)
    }

    fn short(&mut self, table: &OptionTable, short: char) -> Result<Resolved> {
        let Some(spec) = table.find_short(short) else {
            return Ok(unknown(format!("-{short}")));
        };
        let argument = match spec.arity {
            Arity::None => None,
            Arity::Required if !self.cluster.is_empty() => Some(self.cluster.drain(..).collect()),
            Arity::Required => self.args.pop_front(),
        };
        known(spec, argument)
    }
}

fn known(spec: &OptionSpec, argument: Option<String>) -> Result<Resolved> {
    spec.check_arity(argument.as_deref())?;
    Ok(Resolved::Option(ResolvedOption {
        code: Code::Known(spec.id),
        argument,
    }))
}

fn unknown(spelling: String) -> Resolved {
    Resolved::Option(ResolvedOption {
        code: Code::Unknown(spelling),
        argument: None,
    })
}
