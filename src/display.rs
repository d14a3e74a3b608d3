use crate::cli::Flags;
use crate::entry::{get_entries, Entry};

use colored::{Color, Colorize};
use mime_guess::from_path;
use mime_guess::mime::{APPLICATION, IMAGE, TEXT, VIDEO};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct FormatSizes {
    pub file_len: usize,
    pub sym_len: usize,
}

/// Lists every path in `flags` (the current directory when there are none).
///
/// Paths that cannot be read are reported on `diag` and skipped; the number
/// of such failures is returned.
pub fn print_listing(prog: &str, flags: &Flags, out: &mut impl Write, diag: &mut impl Write) -> io::Result<usize> {
    let default_paths = [PathBuf::from(".")];
    let paths = if flags.paths.is_empty() {
        &default_paths[..]
    } else {
        &flags.paths[..]
    };
    let mut listing = Listing {
        prog,
        flags,
        headers: paths.len() > 1 || flags.recursive,
        blocks: 0,
        failures: 0,
    };
    for path in paths {
        listing.list_path(path, out, diag)?;
    }
    Ok(listing.failures)
}

struct Listing<'a> {
    prog: &'a str,
    flags: &'a Flags,
    headers: bool,
    blocks: usize,
    failures: usize,
}

impl Listing<'_> {
    fn list_path(&mut self, path: &Path, out: &mut impl Write, diag: &mut impl Write) -> io::Result<()> {
        let entries = match get_entries(path, self.flags) {
            Ok(entries) => entries,
            Err(error) => {
                writeln!(diag, "{}: cannot access '{}': {error}", self.prog, path.display())?;
                self.failures += 1;
                return Ok(());
            }
        };

        if self.headers && path.is_dir() {
            if self.blocks > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{}:", path.display())?;
        }
        self.blocks += 1;
        print_entries(&entries, self.flags, out)?;

        if self.flags.recursive && path.is_dir() {
            for entry in entries.iter().filter(|entry| entry.is_folder()) {
                self.list_path(&entry.path, out, diag)?;
            }
        }
        Ok(())
    }
}

pub fn print_entries(entries: &[Entry], flags: &Flags, writer: &mut impl Write) -> io::Result<()> {
    // Get relevant formatting string lengths
    let sizes = calculate_format_sizes(entries, flags);

    for (index, entry) in entries.iter().enumerate() {
        // Comma separate
        if index != 0 && flags.stream_output {
            write!(writer, ", ")?;
        }
        entry.print_entry(writer, flags, &sizes)?;
        if !flags.stream_output {
            writeln!(writer)?;
        }
    }
    if flags.stream_output && !entries.is_empty() {
        writeln!(writer)?;
    }
    writer.flush()
}

impl Entry {
    /// Prints the file or directory into writer depending on the flags
    pub fn print_entry(&self, writer: &mut impl Write, flags: &Flags, sizes: &FormatSizes) -> io::Result<()> {
        // stream_output flag returns the files and directories as a comma separated list
        if flags.stream_output {
            write!(writer, "{}", self.get_name())?;
            return Ok(());
        }

        if flags.long_listing {
            write!(writer, "{} ", self.get_permissions())?;
            write!(writer, "{:>width$} ", self.get_links(), width = sizes.sym_len)?;
            write!(writer, "{} ", self.get_owners())?;
            write!(writer, "{:>width$} ", format_size(self.get_size(), flags), width = sizes.file_len)?;
            write!(writer, "{} ", self.get_modified_time())?;
        }

        if self.is_folder() {
            return write!(writer, "{}/", self.get_name().bold().red());
        }

        if flags.show_size && !flags.long_listing {
            write!(writer, "{}\t", format_size(self.get_size(), flags))?;
        }

        // Entries are color coded based on file type
        let color = match from_path(&self.name).first_or_octet_stream().type_() {
            IMAGE => Color::Blue,
            TEXT => Color::Yellow,
            APPLICATION => Color::Green,
            VIDEO => Color::Cyan,
            _ => Color::Magenta,
        };

        write!(writer, "{}", self.get_name().color(color))?;

        Ok(())
    }
}

fn format_size(bytes: u64, flags: &Flags) -> String {
    if flags.human {
        bytes_to_human(bytes)
    } else {
        bytes.to_string()
    }
}

/// Converts bytes into human readable format like 2.5KB
fn bytes_to_human(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "K", "M", "G", "T"];
    if bytes == 0 {
        return String::from("0B");
    }
    let index = (bytes.ilog(1024) as usize).min(UNITS.len() - 1);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "index is never more than `UNITS.len() - 1`"
    )]
    #[allow(
        clippy::cast_precision_loss,
        reason = "files probably won't be that big, and precision won't matter by that point"
    )]
    let value = bytes as f64 / 1024_f64.powi(index as i32);
    if index == 0 {
        format!("{}{}", value, UNITS[index])
    } else {
        format!("{:.1}{}", value, UNITS[index])
    }
}

fn calculate_format_sizes(entries: &[Entry], flags: &Flags) -> FormatSizes {
    let file_len = entries
        .iter()
        .map(|entry| format_size(entry.get_size(), flags).chars().count())
        .max()
        .unwrap_or(6);

    let sym_len = entries
        .iter()
        .map(|entry| entry.get_links().chars().count())
        .max()
        .unwrap_or(2);

    FormatSizes { file_len, sym_len }
}
