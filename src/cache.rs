//! Cache-root resolution and the local cache layout.
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};


/// Environment variable that overrides the default cache root.
pub const CACHE_DIR_ENV: &str = "LIBSVM_DATASET_DIR";

/// Directory under the user's home used when the variable is unset.
const DEFAULT_DIR_NAME: &str = "libsvm";


/// A resolved cache root.
///
/// The root is resolved exactly once, when this struct is built.
/// Nothing in the crate reads the environment after that point,
/// so construction stays deterministic and tests can inject their own
/// root without mutating the process environment.
///
/// Cached files live at `<root>/<category>/<basename>`, where
/// `category` is the parent path segment of the remote URL
/// (distinguishing dataset families such as `binary` or `multilabel`)
/// and `basename` is its final segment, compression extension included.
/// The same URL always maps to the same local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    root: PathBuf,
}


impl CacheConfig {
    /// Resolve the default cache root:
    /// `$LIBSVM_DATASET_DIR` if set, otherwise `<home>/libsvm`.
    pub fn resolve() -> Result<Self> {
        if let Ok(dir) = env::var(CACHE_DIR_ENV) {
            return Ok(Self { root: PathBuf::from(dir) });
        }

        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config(format!(
                "no home directory found. Set {CACHE_DIR_ENV} \
                 to choose a cache location"
            )))?;
        Ok(Self { root: home.join(DEFAULT_DIR_NAME) })
    }


    /// Use an explicit cache root instead of the environment default.
    pub fn with_root<P>(root: P) -> Self
        where P: AsRef<Path>,
    {
        Self { root: root.as_ref().to_path_buf() }
    }


    /// The cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }


    /// Local cache location for the file at `url`.
    pub fn local_path(&self, url: &str) -> Result<PathBuf> {
        let category = url_category(url)?;
        let basename = url_basename(url)?;
        Ok(self.root.join(category).join(basename))
    }
}


/// Final path segment of `url`, compression extension included.
pub(crate) fn url_basename(url: &str) -> Result<&str> {
    path_segments(url)
        .last()
        .ok_or_else(|| Error::Config(format!(
            "cannot derive a file name from url {url}"
        )))
}


/// Parent path segment of `url`,
/// used as the dataset-family directory in the cache.
/// The host itself never counts as a category,
/// so the URL needs at least `host/category/basename`.
pub(crate) fn url_category(url: &str) -> Result<&str> {
    let segments = path_segments(url).collect::<Vec<_>>();
    if segments.len() < 3 {
        return Err(Error::Config(format!(
            "cannot derive a dataset category from url {url}"
        )));
    }
    Ok(segments[segments.len() - 2])
}


/// Path segments of `url` with the scheme prefix stripped.
fn path_segments(url: &str) -> impl Iterator<Item = &str> {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    without_scheme
        .trim_end_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
}


#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str =
        "https://www.csie.ntu.edu.tw/~cjlin/libsvmtools/datasets/binary/ijcnn1.tr.bz2";

    #[test]
    fn path_layout() {
        let cache = CacheConfig::with_root("/tmp/svmdata");
        let path = cache.local_path(URL).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/svmdata/binary/ijcnn1.tr.bz2"));
    }


    #[test]
    fn same_url_same_path() {
        let cache = CacheConfig::with_root("/tmp/svmdata");
        assert_eq!(
            cache.local_path(URL).unwrap(),
            cache.local_path(URL).unwrap(),
        );
    }


    #[test]
    fn category_and_basename() {
        assert_eq!(url_category(URL).unwrap(), "binary");
        assert_eq!(url_basename(URL).unwrap(), "ijcnn1.tr.bz2");
    }


    #[test]
    fn url_without_category_is_rejected() {
        assert!(url_category("https://host/file.bz2").is_err());
        assert!(url_basename("https://").is_err());
    }


    #[test]
    fn env_override_wins() {
        env::set_var(CACHE_DIR_ENV, "/tmp/override");
        let cache = CacheConfig::resolve().unwrap();
        env::remove_var(CACHE_DIR_ENV);

        assert_eq!(cache.root(), Path::new("/tmp/override"));
    }
}
