use chrono::{Local, TimeZone};
use libc::{S_IRGRP, S_IROTH, S_IRUSR, S_IWGRP, S_IWOTH, S_IWUSR, S_IXGRP, S_IXOTH, S_IXUSR};
use nix::unistd::{Gid, Group, Uid, User};
use std::ffi::{OsStr, OsString};
use std::fs::{self, Metadata};
use std::io;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::cli::Flags;

/// Enum to represent directories or files
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileType {
    Dir,
    File,
}

impl From<fs::FileType> for FileType {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Dir
        } else {
            Self::File
        }
    }
}

impl FileType {
    /// Returns `true` if the file type is [`Dir`].
    ///
    /// [`Dir`]: FileType::Dir
    #[must_use]
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Dir)
    }
}

/// Represents a File or a Dir with all the metadata
pub struct Entry {
    pub name: OsString,
    pub path: PathBuf,
    pub r#type: FileType,
    pub metadata: Metadata,
}

impl Entry {
    pub fn get_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }

    pub fn get_size(&self) -> u64 {
        self.metadata.len()
    }

    pub const fn is_folder(&self) -> bool {
        self.r#type.is_dir()
    }

    /// Gets permissions of entry
    pub fn get_permissions(&self) -> String {
        let kind = if self.is_folder() { 'd' } else { '-' };
        format!("{kind}{}", parse_permissions(self.metadata.permissions().mode()))
    }

    /// Gets num of links
    pub fn get_links(&self) -> String {
        format!("{}", self.metadata.nlink())
    }

    /// Get owner and group of entry
    pub fn get_owners(&self) -> String {
        get_file_owner_and_group(&self.metadata)
    }

    /// Get modified (local) time of entry
    pub fn get_modified_time(&self) -> String {
        match self.metadata.modified() {
            Ok(mod_time) => get_file_date(mod_time),
            Err(e) => format!("Error: {e}"),
        }
    }
}

/// Reads the entries of `dir_path` (or the single file it names), filtered and
/// sorted according to `flags`.
pub fn get_entries(dir_path: &Path, flags: &Flags) -> io::Result<Vec<Entry>> {
    let meta = fs::metadata(dir_path)?;
    if !meta.is_dir() {
        return Ok(vec![Entry {
            name: dir_path
                .file_name()
                .map_or_else(|| dir_path.as_os_str().to_os_string(), |name| name.to_os_string()),
            path: dir_path.to_path_buf(),
            r#type: FileType::File,
            metadata: meta,
        }]);
    }

    // Collect entries into vector, ignoring hidden entries if show_hidden is false
    let mut entries: Vec<_> = fs::read_dir(dir_path)?
        .filter_map(|entry_result| {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    eprintln!("Warning: Could not access entry: {e}");
                    return None;
                }
            };

            let name = entry.file_name();
            if !flags.show_hidden && is_hidden(&name) {
                return None;
            }

            let file_type = match entry.file_type() {
                Ok(ft) => ft.into(),
                Err(e) => {
                    eprintln!("Warning: Could not get file type: {e}");
                    return None;
                }
            };

            let metadata = match entry.metadata() {
                Ok(meta) => meta,
                Err(e) => {
                    eprintln!("Warning: Could not retrieve metadata: {e}");
                    return None;
                }
            };

            Some(Entry {
                name,
                path: entry.path(),
                r#type: file_type,
                metadata,
            })
        })
        .collect();

    sort_entries(&mut entries, flags);
    Ok(entries)
}

/// Sorts by name, or by size/time modified (directories first) when asked.
fn sort_entries(entries: &mut [Entry], flags: &Flags) {
    if flags.sort_by_size || flags.sort_by_modified_time {
        entries.sort_by(|a, b| {
            let key = |entry: &Entry| {
                let metadata = &entry.metadata;
                (
                    flags.sort_by_size.then(|| u64::MAX - metadata.len()),
                    if flags.sort_by_modified_time {
                        metadata.modified().ok().and_then(|time| time.elapsed().ok())
                    } else {
                        None
                    },
                )
            };
            let mut ordering = Ord::cmp(&key(a), &key(b)).then_with(|| a.name.cmp(&b.name));
            // Reversing
            if flags.reverse_sort {
                ordering = ordering.reverse();
            }
            Ord::cmp(&a.r#type, &b.r#type).then(ordering)
        });
    } else {
        entries.sort_by(|a, b| {
            let ordering = a.name.cmp(&b.name);
            if flags.reverse_sort {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}

// Checks if given name is 'hidden' (starts with '.')
fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

/// Helper functions to get and parse permissions of entries
/// Credit to Matthias Endler at endler.dev
fn parse_permissions(mode: u32) -> String {
    let user = triplet(mode, S_IRUSR, S_IWUSR, S_IXUSR);
    let group = triplet(mode, S_IRGRP, S_IWGRP, S_IXGRP);
    let other = triplet(mode, S_IROTH, S_IWOTH, S_IXOTH);
    [user, group, other].join("")
}

#[allow(
    clippy::useless_conversion,
    reason = "mode_t is u16 on some platforms"
)]
fn triplet(mode: u32, read: libc::mode_t, write: libc::mode_t, execute: libc::mode_t) -> String {
    let (read, write, execute) = (u32::from(read), u32::from(write), u32::from(execute));
    match (mode & read, mode & write, mode & execute) {
        (0, 0, 0) => "---",
        (_, 0, 0) => "r--",
        (0, _, 0) => "-w-",
        (0, 0, _) => "--x",
        (_, 0, _) => "r-x",
        (_, _, 0) => "rw-",
        (0, _, _) => "-wx",
        (_, _, _) => "rwx",
    }
    .to_string()
}

/// Gets the owner and group names associated with a file
pub fn get_file_owner_and_group(meta: &Metadata) -> String {
    // Get owner and group IDs
    let uid = meta.uid();
    let gid = meta.gid();

    // Look up the user and group names
    let owner_name = User::from_uid(Uid::from_raw(uid))
        .ok()
        .flatten()
        .map_or_else(|| uid.to_string(), |user| user.name);

    let group_name = Group::from_gid(Gid::from_raw(gid))
        .ok()
        .flatten()
        .map_or_else(|| gid.to_string(), |group| group.name);

    format!("{owner_name} {group_name}")
}

/// Converts SystemTime of file metadata to readable string EX: Sep 10 14:23
fn get_file_date(modified_time: SystemTime) -> String {
    match modified_time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(time_since_epoch) => {
            #[allow(clippy::cast_possible_wrap, reason = "mtimes fit in i64 seconds")]
            let secs = time_since_epoch.as_secs() as i64;
            let nsecs = time_since_epoch.subsec_nanos();
            Local
                .timestamp_opt(secs, nsecs)
                .single()
                .map_or_else(|| format!("{secs}"), |timestamp| timestamp.format("%b %d %H:%M").to_string())
        }
        Err(e) => format!("Error: {e:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn permissions_render_as_rwx_triplets() {
        assert_eq!(parse_permissions(0o755), "rwxr-xr-x");
        assert_eq!(parse_permissions(0o640), "rw-r-----");
        assert_eq!(parse_permissions(0o000), "---------");
    }

    #[test]
    fn dot_names_are_hidden() {
        assert!(is_hidden(&OsString::from(".git")));
        assert!(!is_hidden(&OsString::from("src")));
        assert!(!is_hidden(&OsString::new()));
    }

    #[test]
    fn entries_sort_by_name_and_hide_dotfiles() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.txt", ".hidden"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("c")).unwrap();

        let names = |flags: &Flags| -> Vec<String> {
            get_entries(dir.path(), flags).unwrap().iter().map(Entry::get_name).collect()
        };

        assert_eq!(names(&Flags::default()), vec!["a.txt", "b.txt", "c"]);

        let flags = Flags {
            show_hidden: true,
            reverse_sort: true,
            ..Flags::default()
        };
        assert_eq!(names(&flags), vec!["c", "b.txt", "a.txt", ".hidden"]);
    }

    #[test]
    fn size_sort_puts_directories_first_then_largest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("small"), "x").unwrap();
        fs::write(dir.path().join("large"), "x".repeat(100)).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let flags = Flags {
            sort_by_size: true,
            ..Flags::default()
        };
        let names: Vec<_> = get_entries(dir.path(), &flags).unwrap().iter().map(Entry::get_name).collect();
        assert_eq!(names, vec!["sub", "large", "small"]);
    }

    #[test]
    fn a_file_path_lists_itself() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.md");
        fs::write(&file, "hello").unwrap();

        let entries = get_entries(&file, &Flags::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].get_name(), "notes.md");
        assert_eq!(entries[0].get_size(), 5);
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(get_entries(&dir.path().join("nope"), &Flags::default()).is_err());
    }
}
