//! One-shot download of remote dataset files.
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::error::{Error, Result};


/// Suffix of the temporary file a download streams into
/// before the final rename.
const PART_SUFFIX: &str = ".part";


/// Download the resource at `url` into `dest`.
///
/// The parent directory of `dest` is created as needed. The response
/// body is streamed to a temporary `<dest>.part` file in the same
/// directory and renamed into place once fully written, so an
/// interrupted transfer never leaves a truncated file at `dest`.
///
/// This is a one-time setup operation, not a hot path:
/// there is no retry, no resume, and no range-request support.
/// Network failures, non-success HTTP statuses, and disk-write
/// failures all surface as fatal errors.
pub fn download(url: &str, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    println!("{} {url}", "Downloading".bold());

    let response = ureq::get(url)
        .call()
        .map_err(|e| Error::Transfer {
            url: url.to_string(),
            source: Box::new(e),
        })?;

    let tmp = part_path(dest);
    if let Err(e) = write_body(response, &tmp) {
        // Leave nothing behind on a failed transfer.
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, dest)?;

    Ok(())
}


fn write_body(response: ureq::Response, tmp: &Path) -> Result<()> {
    let mut reader = response.into_reader();
    let mut file = File::create(tmp)?;
    io::copy(&mut reader, &mut file)?;
    Ok(())
}


fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(PART_SUFFIX);
    PathBuf::from(name)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_host_is_a_transfer_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("binary").join("toy.txt");

        // Port 1 refuses connections immediately.
        let err = download("http://127.0.0.1:1/binary/toy.txt", &dest)
            .unwrap_err();
        assert!(matches!(err, Error::Transfer { .. }));

        // The failed transfer must not leave any file behind.
        assert!(!dest.exists());
        assert!(!part_path(&dest).exists());
    }


    #[test]
    fn part_path_appends_suffix() {
        let dest = Path::new("/cache/binary/ijcnn1.tr.bz2");
        assert_eq!(
            part_path(dest),
            PathBuf::from("/cache/binary/ijcnn1.tr.bz2.part"),
        );
    }
}
