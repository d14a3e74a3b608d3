use clap::{Arg, ArgAction, Command};

use std::path::PathBuf;

use crate::options::{Arity, OptionId, OptionTable};

/// Listing configuration produced by option dispatch.
#[allow(
    clippy::struct_excessive_bools,
    reason = "this is not a state machine, but a set of flags"
)]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Flags {
    /// do not ignore entries starting with `.`
    pub show_hidden: bool,

    /// show sizes of files
    pub show_size: bool,

    /// print sizes in human-readable units
    pub human: bool,

    /// reverse order when sorting
    pub reverse_sort: bool,

    /// sort by file size, largest first
    pub sort_by_size: bool,

    /// long listing (-l)
    pub long_listing: bool,

    /// sort by time modified, newest first
    pub sort_by_modified_time: bool,

    /// list files separated by `, `
    pub stream_output: bool,

    /// descend into subdirectories
    pub recursive: bool,

    /// `--help` was given; nothing is listed
    pub show_help: bool,

    /// paths to list entries from, in command-line order
    pub paths: Vec<PathBuf>,
}

/// Builds the help-only `clap` command describing `table`.
///
/// Parsing goes through [`crate::dispatch`]; this command is only rendered.
pub fn command(table: &OptionTable) -> Command {
    let command = Command::new(env!("CARGO_PKG_NAME"))
        .about(concat!(env!("CARGO_PKG_NAME"), " - list directory contents"))
        .after_help("Options may also be given as a JSON object, e.g. -J '{\"long\": true, \"j\": \"more.json\"}'")
        .disable_help_flag(true);

    let command = table.specs().iter().fold(command, |command, spec| {
        let mut arg = Arg::new(spec.long).long(spec.long).help(spec.help);
        if let Some(short) = spec.short {
            arg = arg.short(short);
        }
        arg = match (spec.id, spec.arity) {
            (OptionId::Help, _) => arg.action(ArgAction::Help),
            (_, Arity::None) => arg.action(ArgAction::SetTrue),
            (_, Arity::Required) => arg
                .action(ArgAction::Append)
                .value_name(spec.value_name.unwrap_or("VALUE")),
        };
        command.arg(arg)
    });

    command.arg(
        Arg::new("path")
            .value_name("PATH")
            .action(ArgAction::Append)
            .help("paths to list entries from"),
    )
}

/// Renders the help text for `table`.
pub fn render_help(table: &OptionTable) -> String {
    command(table).render_help().to_string()
}
