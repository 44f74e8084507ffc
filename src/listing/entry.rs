use chrono::{DateTime, Local, TimeZone};
use nix::unistd::{Uid, User};
use serde::Serialize;
use std::fmt::Display;
use std::fs::Metadata;
use std::io;
use std::os::unix::fs::MetadataExt;
use tracing::trace;

const S_IFMT: u32 = 0o170000;
const S_IFSOCK: u32 = 0o140000;
const S_IFLNK: u32 = 0o120000;
const S_IFREG: u32 = 0o100000;
const S_IFBLK: u32 = 0o060000;
const S_IFDIR: u32 = 0o040000;
const S_IFCHR: u32 = 0o020000;
const S_IFIFO: u32 = 0o010000;

const S_ISUID: u32 = 0o4000;
const S_ISGID: u32 = 0o2000;
const S_ISVTX: u32 = 0o1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Owner {
    pub name: String,
    pub uid: u32,
}

impl Owner {
    /// Look `uid` up in the user database. Unknown ids keep the number as
    /// the name.
    pub fn from_uid(uid: u32) -> Self {
        let name = match User::from_uid(Uid::from_raw(uid)) {
            Ok(Some(user)) => user.name,
            Ok(None) => uid.to_string(),
            Err(errno) => {
                trace!(uid, %errno, "user lookup failed");
                uid.to_string()
            }
        };
        Self { name, uid }
    }
}

/// Details of one directory entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryRecord {
    pub name: String,
    pub permissions: String,
    pub owner: Owner,
    pub modified: DateTime<Local>,
}

impl EntryRecord {
    pub fn from_metadata(name: impl Into<String>, metadata: &Metadata) -> io::Result<Self> {
        Ok(Self {
            name: name.into(),
            permissions: permission_string(metadata.mode()),
            owner: Owner::from_uid(metadata.uid()),
            modified: DateTime::<Local>::from(metadata.modified()?),
        })
    }

    pub fn last_modified(&self, format: &str) -> String {
        format_timestamp(&self.modified, format)
    }
}

pub fn format_timestamp<Tz>(timestamp: &DateTime<Tz>, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format(format).to_string()
}

/// `ls -l` style mode string, e.g. `drwxr-xr-x`.
pub fn permission_string(mode: u32) -> String {
    let mut out = String::with_capacity(10);

    out.push(match mode & S_IFMT {
        S_IFDIR => 'd',
        S_IFREG => '-',
        S_IFLNK => 'l',
        S_IFCHR => 'c',
        S_IFBLK => 'b',
        S_IFIFO => 'p',
        S_IFSOCK => 's',
        _ => '?',
    });

    let triples = [
        (0o400, 0o200, 0o100, S_ISUID, 's'),
        (0o040, 0o020, 0o010, S_ISGID, 's'),
        (0o004, 0o002, 0o001, S_ISVTX, 't'),
    ];

    for (read, write, exec, special, special_char) in triples {
        out.push(if mode & read != 0 { 'r' } else { '-' });
        out.push(if mode & write != 0 { 'w' } else { '-' });

        let executable = mode & exec != 0;
        out.push(match (mode & special != 0, executable) {
            (true, true) => special_char,
            (true, false) => special_char.to_ascii_uppercase(),
            (false, true) => 'x',
            (false, false) => '-',
        });
    }

    out
}
