use std::collections::VecDeque;

/// An option declared by a JSON document, not yet matched against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFlag {
    pub name: String,
    pub argument: Option<String>,
}

impl PendingFlag {
    pub fn new(name: impl Into<String>, argument: Option<String>) -> Self {
        Self {
            name: name.into(),
            argument,
        }
    }

    pub const fn has_argument(&self) -> bool {
        self.argument.is_some()
    }
}

/// FIFO of pending flags: loaders append at the back, the resolver pops the front.
#[derive(Debug, Default)]
pub struct FlagQueue {
    flags: VecDeque<PendingFlag>,
}

impl FlagQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, flag: PendingFlag) {
        self.flags.push_back(flag);
    }

    pub fn pop(&mut self) -> Option<PendingFlag> {
        self.flags.pop_front()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingFlag> {
        self.flags.iter()
    }
}

impl Extend<PendingFlag> for FlagQueue {
    fn extend<I: IntoIterator<Item = PendingFlag>>(&mut self, iter: I) {
        self.flags.extend(iter);
    }
}
