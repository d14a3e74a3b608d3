//! Applies resolved options to the listing configuration.

use std::io::Write;

use tracing::debug;

use crate::cli::Flags;
use crate::error::{OptionError, Result};
use crate::options::{
    loader, ArgScanner, Code, JsonSource, OptionId, OptionResolver, OptionTable, Resolved, ResolvedOption,
};

/// Everything learned from the command line and the JSON documents it loaded.
#[derive(Debug, Default)]
pub struct Resolution {
    pub flags: Flags,
    /// Option names that matched nothing, as they were written.
    pub unknown: Vec<String>,
}

/// Resolves `args` (program name excluded) against the builtin option table.
///
/// Unknown options are reported on `diag` and skipped. Any other problem
/// stops resolution at once and is returned. `--help` stops command-line
/// scanning once the flags already queued have been resolved.
pub fn resolve_args<I, S, W>(prog: &str, args: I, diag: &mut W) -> Result<Resolution>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    W: Write,
{
    let mut resolver = OptionResolver::new(OptionTable::builtin(), ArgScanner::new(args));
    let mut resolution = Resolution::default();

    loop {
        // after --help, only what is already queued is still resolved
        if resolution.flags.show_help && resolver.queue().is_empty() {
            break;
        }
        let Some(item) = resolver.next_step()? else {
            break;
        };
        match item {
            Resolved::Operand(path) => resolution.flags.paths.push(path.into()),
            Resolved::Option(ResolvedOption {
                code: Code::Unknown(name),
                ..
            }) => {
                writeln!(diag, "{prog}: {name}: No such option").map_err(OptionError::Diagnostic)?;
                resolution.unknown.push(name);
            }
            Resolved::Option(ResolvedOption {
                code: Code::Known(id),
                argument,
            }) => apply(id, argument, &mut resolution.flags, &mut resolver)?,
        }
    }

    debug!(flags = ?resolution.flags, unknown = resolution.unknown.len(), "options resolved");
    Ok(resolution)
}

/// Applies one matched option. JSON options feed the resolver's queue.
fn apply(
    id: OptionId,
    argument: Option<String>,
    flags: &mut Flags,
    resolver: &mut OptionResolver,
) -> Result<()> {
    match id {
        OptionId::All => flags.show_hidden = true,
        OptionId::Sizes => flags.show_size = true,
        OptionId::Human => flags.human = true,
        OptionId::Long => flags.long_listing = true,
        OptionId::Recursive => flags.recursive = true,
        OptionId::Reverse => flags.reverse_sort = true,
        OptionId::SortSize => flags.sort_by_size = true,
        OptionId::SortMtime => flags.sort_by_modified_time = true,
        OptionId::Stream => flags.stream_output = true,
        OptionId::JsonOptions | OptionId::Json => {
            let inline = id == OptionId::Json;
            let source = argument.ok_or(OptionError::MissingArgument {
                name: if inline { "json" } else { "json-options" },
            })?;
            loader::load(&JsonSource::new(source, inline), resolver.queue_mut())?;
        }
        OptionId::Help => flags.show_help = true,
    }
    Ok(())
}
