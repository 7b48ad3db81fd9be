use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{Local, NaiveDateTime, TimeZone};
use filetime::FileTime;
use lillio_download_application::{ApplicationError, ImageStore};

#[derive(Debug, Default)]
pub struct FsImageStore;

impl ImageStore for FsImageStore {
    fn ensure_directory(&self, directory: &Path) -> Result<(), ApplicationError> {
        fs::create_dir_all(directory).map_err(|error| {
            ApplicationError::Io(format!(
                "failed to create output directory {}: {error}",
                directory.display()
            ))
        })
    }

    fn write_image(&self, path: &Path, bytes: &[u8]) -> Result<(), ApplicationError> {
        fs::write(path, bytes).map_err(|error| {
            ApplicationError::Io(format!("failed to write {}: {error}", path.display()))
        })
    }

    fn set_timestamps(
        &self,
        path: &Path,
        taken_at: NaiveDateTime,
    ) -> Result<(), ApplicationError> {
        let stamp = local_file_time(taken_at);
        filetime::set_file_mtime(path, stamp).map_err(|error| {
            ApplicationError::Io(format!(
                "failed to set modification time of {}: {error}",
                path.display()
            ))
        })?;
        set_creation_time(path, stamp)
    }
}

/// Reads `taken_at` as wall-clock time in the local zone. Falls back to UTC when that
/// wall-clock time does not exist locally.
fn local_file_time(taken_at: NaiveDateTime) -> FileTime {
    let seconds = Local
        .from_local_datetime(&taken_at)
        .earliest()
        .map(|local| local.timestamp())
        .unwrap_or_else(|| taken_at.and_utc().timestamp());
    FileTime::from_unix_time(seconds, 0)
}

#[cfg(windows)]
fn set_creation_time(path: &Path, stamp: FileTime) -> Result<(), ApplicationError> {
    use std::fs::{File, FileTimes};
    use std::os::windows::fs::FileTimesExt;

    let created = system_time(stamp)?;
    File::options()
        .write(true)
        .open(path)
        .and_then(|file| file.set_times(FileTimes::new().set_created(created)))
        .map_err(|error| {
            ApplicationError::Io(format!(
                "failed to set creation time of {}: {error}",
                path.display()
            ))
        })
}

#[cfg(not(windows))]
fn set_creation_time(path: &Path, stamp: FileTime) -> Result<(), ApplicationError> {
    tracing::debug!(
        path = %path.display(),
        created = ?system_time(stamp).ok(),
        "creation time is not settable on this platform"
    );
    Ok(())
}

fn system_time(stamp: FileTime) -> Result<SystemTime, ApplicationError> {
    let seconds = stamp.unix_seconds();
    let offset = Duration::from_secs(seconds.unsigned_abs());
    let time = if seconds >= 0 {
        UNIX_EPOCH.checked_add(offset)
    } else {
        UNIX_EPOCH.checked_sub(offset)
    };
    time.ok_or_else(|| ApplicationError::Io(format!("timestamp {seconds} is out of range")))
}
