use crate::error::{OptionError, Result};

/// Whether an option takes an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    Required,
}

/// Identifies a recognized option once it has been matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionId {
    All,
    Sizes,
    Human,
    Long,
    Recursive,
    Reverse,
    SortSize,
    SortMtime,
    Stream,
    JsonOptions,
    Json,
    Help,
}

/// One registered option: its names, arity and help line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub id: OptionId,
    pub long: &'static str,
    pub short: Option<char>,
    pub arity: Arity,
    pub value_name: Option<&'static str>,
    pub help: &'static str,
}

impl OptionSpec {
    const fn switch(id: OptionId, long: &'static str, short: Option<char>, help: &'static str) -> Self {
        Self {
            id,
            long,
            short,
            arity: Arity::None,
            value_name: None,
            help,
        }
    }

    const fn with_value(
        id: OptionId,
        long: &'static str,
        short: char,
        value_name: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            id,
            long,
            short: Some(short),
            arity: Arity::Required,
            value_name: Some(value_name),
            help,
        }
    }

    /// Checks the presence of `argument` against the declared arity.
    pub fn check_arity(&self, argument: Option<&str>) -> Result<()> {
        match (self.arity, argument) {
            (Arity::Required, None) => Err(OptionError::MissingArgument { name: self.long }),
            (Arity::None, Some(_)) => Err(OptionError::UnexpectedArgument { name: self.long }),
            _ => Ok(()),
        }
    }
}

static OPTIONS: [OptionSpec; 12] = [
    OptionSpec::switch(OptionId::All, "all", Some('a'), "do not ignore entries starting with `.`"),
    OptionSpec::switch(OptionId::Sizes, "sizes", Some('s'), "show sizes of files; use -h for human-readable units"),
    OptionSpec::switch(OptionId::Human, "human", Some('h'), "print sizes in human-readable units"),
    OptionSpec::switch(OptionId::Long, "long", Some('l'), "use a long listing format"),
    OptionSpec::switch(OptionId::Recursive, "recursive", Some('r'), "list subdirectories recursively"),
    OptionSpec::switch(OptionId::Reverse, "reverse", None, "reverse order when sorting"),
    OptionSpec::switch(OptionId::SortSize, "sort-size", Some('S'), "sort by file size, largest first"),
    OptionSpec::switch(OptionId::SortMtime, "sort-mtime", Some('t'), "sort by time modified, newest first"),
    OptionSpec::switch(OptionId::Stream, "stream", Some('m'), "list files separated by `, `"),
    OptionSpec::with_value(OptionId::JsonOptions, "json-options", 'j', "FILE", "load additional options from a JSON file"),
    OptionSpec::with_value(OptionId::Json, "json", 'J', "JSON", "load additional options from inline JSON text"),
    OptionSpec::switch(OptionId::Help, "help", None, "show this help message"),
];

/// Registry of recognized options, fixed for the life of the process.
#[derive(Debug, Clone, Copy)]
pub struct OptionTable {
    specs: &'static [OptionSpec],
}

impl OptionTable {
    /// The options understood by `lsrs`.
    pub fn builtin() -> Self {
        Self { specs: &OPTIONS }
    }

    pub fn specs(&self) -> &'static [OptionSpec] {
        self.specs
    }

    /// Exact long-name match, then a short alias match for one-character names.
    pub fn find(&self, name: &str) -> Option<&'static OptionSpec> {
        if let Some(spec) = self.find_long(name) {
            return Some(spec);
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(short), None) => self.find_short(short),
            _ => None,
        }
    }

    pub fn find_long(&self, name: &str) -> Option<&'static OptionSpec> {
        self.specs.iter().find(|spec| spec.long == name)
    }

    pub fn find_short(&self, short: char) -> Option<&'static OptionSpec> {
        self.specs.iter().find(|spec| spec.short == Some(short))
    }
}
