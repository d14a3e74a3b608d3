use tracing::trace;

use super::queue::{FlagQueue, PendingFlag};
use super::scan::ArgScanner;
use super::table::{OptionId, OptionTable};
use crate::error::Result;

/// Outcome of matching a name against the option table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    Known(OptionId),
    /// No such option; holds the name as it was spelled.
    Unknown(String),
}

/// A matched option together with the argument it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOption {
    pub code: Code,
    pub argument: Option<String>,
}

/// One item produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Option(ResolvedOption),
    /// A non-option command-line token.
    Operand(String),
}

/// Where the most recent step took its input from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    QueueDrain,
    CliScan,
    Done,
}

/// Matches a JSON-declared flag against `table`, enforcing arity.
pub fn resolve_flag(table: &OptionTable, flag: PendingFlag) -> Result<ResolvedOption> {
    let Some(spec) = table.find(&flag.name) else {
        return Ok(ResolvedOption {
            code: Code::Unknown(flag.name),
            argument: None,
        });
    };
    spec.check_arity(flag.argument.as_deref())?;
    Ok(ResolvedOption {
        code: Code::Known(spec.id),
        argument: flag.argument,
    })
}

/// Merges queued JSON flags with the command line into one ordered stream.
///
/// Every step looks at the queue first, so flags enqueued while handling an
/// option (and whatever they enqueue in turn) are all resolved before the
/// next command-line token is read.
#[derive(Debug)]
pub struct OptionResolver {
    table: OptionTable,
    queue: FlagQueue,
    scanner: ArgScanner,
    state: State,
}

impl OptionResolver {
    pub fn new(table: OptionTable, scanner: ArgScanner) -> Self {
        Self {
            table,
            queue: FlagQueue::new(),
            scanner,
            state: State::CliScan,
        }
    }

    pub const fn state(&self) -> State {
        self.state
    }

    pub fn queue_mut(&mut self) -> &mut FlagQueue {
        &mut self.queue
    }

    pub const fn queue(&self) -> &FlagQueue {
        &self.queue
    }

    /// Produces the next resolved item; `Ok(None)` once both sources are empty.
    pub fn next_step(&mut self) -> Result<Option<Resolved>> {
        if let Some(flag) = self.queue.pop() {
            self.state = State::QueueDrain;
            trace!(name = %flag.name, pending = self.queue.len(), "resolving queued flag");
            return resolve_flag(&self.table, flag).map(|option| Some(Resolved::Option(option)));
        }
        match self.scanner.next(&self.table) {
            Some(item) => {
                self.state = State::CliScan;
                let item = item?;
                trace!(?item, "resolved command-line item");
                Ok(Some(item))
            }
            None => {
                self.state = State::Done;
                Ok(None)
            }
        }
    }
}
