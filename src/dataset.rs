//! The indexable dataset composing fetch, verify, parse, and remap.
use std::fmt;
use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::cache::{self, CacheConfig};
use crate::digest;
use crate::error::{Error, Result};
use crate::fetch;
use crate::labels::{ClassMap, ClassValue};
use crate::loader::{self, Labels};
use crate::matrix::FeatureMatrix;


/// Dataset category whose files carry multilabel label fields.
const MULTILABEL_CATEGORY: &str = "multilabel";


/// A builder that acquires and loads one LIBSVM dataset file.
///
/// # Example
/// The following fetches the IJCNN1 training split into the cache
/// (unless it is already there), verifies it, and loads it.
/// ```no_run
/// use svmdata::prelude::*;
///
/// fn main() -> svmdata::Result<()> {
///     let dataset = catalog::ijcnn1(Split::Train)?
///         .reader()
///         .download(true)
///         .read()?;
///
///     let (x, y) = dataset.get(0)?;
///     println!("{} features, class {y}", x.len());
///     Ok(())
/// }
/// ```
pub struct SvmDatasetBuilder {
    url: String,
    cache_root: Option<PathBuf>,
    download: bool,
    md5: Option<String>,
    dimensionality: Option<usize>,
    classes: Option<Vec<f64>>,
}


impl SvmDatasetBuilder {
    /// Start building a dataset from the remote location of its file.
    pub fn new<S>(url: S) -> Self
        where S: AsRef<str>,
    {
        Self {
            url: url.as_ref().to_string(),
            cache_root: None,
            download: false,
            md5: None,
            dimensionality: None,
            classes: None,
        }
    }


    /// Override the cache root.
    /// Defaults to `$LIBSVM_DATASET_DIR`, or `<home>/libsvm`.
    pub fn cache_root<P>(mut self, root: P) -> Self
        where P: AsRef<Path>,
    {
        self.cache_root = Some(root.as_ref().to_path_buf());
        self
    }


    /// Allow fetching the file when it is not cached yet.
    /// Default is `false`: a missing file is an error,
    /// never a silent download.
    pub fn download(mut self, flag: bool) -> Self {
        self.download = flag;
        self
    }


    /// Expected MD5 digest of the cached file.
    /// When set, the file is verified after a fetch and on every
    /// reuse of a pre-existing cache entry.
    pub fn md5<S>(mut self, digest: S) -> Self
        where S: AsRef<str>,
    {
        self.md5 = Some(digest.as_ref().to_string());
        self
    }


    /// Declare the feature count every returned vector is padded to.
    /// Useful when a split does not observe the trailing features.
    pub fn dimensionality(mut self, dim: usize) -> Self {
        self.dimensionality = Some(dim);
        self
    }


    /// Declare the class set explicitly instead of inferring it from
    /// the loaded labels, keeping class indices consistent across
    /// splits that do not observe every class.
    pub fn classes<T>(mut self, classes: T) -> Self
        where T: AsRef<[f64]>,
    {
        self.classes = Some(classes.as_ref().to_vec());
        self
    }


    /// Acquire, verify, and load the dataset. This method consumes
    /// `self`.
    ///
    /// Construction is sequential and fail-fast: resolve the local
    /// cache path, fetch the file if missing (and allowed), verify
    /// its digest if one was supplied, parse it, pick the sparse or
    /// dense representation, and remap the labels onto `0..k`.
    ///
    /// Concurrent first-time construction against the same cache path
    /// from several processes is not serialized here; run the first
    /// construction alone when sharing a cold cache.
    pub fn read(self) -> Result<SvmDataset> {
        let cache = match &self.cache_root {
            Some(root) => CacheConfig::with_root(root),
            None => CacheConfig::resolve()?,
        };
        let local_path = cache.local_path(&self.url)?;
        let category = cache::url_category(&self.url)?.to_string();

        if !local_path.is_file() {
            if !self.download {
                return Err(Error::NotFound { path: local_path });
            }
            fetch::download(&self.url, &local_path)?;
            if let Some(expected) = &self.md5 {
                verify(&local_path, expected)?;
            }
        } else if let Some(expected) = &self.md5 {
            verify(&local_path, expected)?;
            println!("{}", "Files already downloaded and verified".green());
        } else {
            println!("Files already downloaded");
        }

        let multilabel = category == MULTILABEL_CATEGORY;
        let (matrix, labels) = loader::parse(&local_path, multilabel)?;
        let density = matrix.density();
        let data = FeatureMatrix::select(matrix);

        let (class_map, targets) = match labels {
            Labels::Scalar(ys) => ClassMap::fit(&ys, self.classes)?,
            Labels::Sets(sets) => {
                if self.classes.is_some() {
                    return Err(Error::Config(
                        "an explicit class set is only supported for \
                         single-label datasets"
                            .into(),
                    ));
                }
                ClassMap::fit_sets(&sets)?
            }
        };

        Ok(SvmDataset {
            category,
            local_path,
            data,
            class_map,
            targets,
            dimensionality: self.dimensionality,
            density,
        })
    }
}


/// Verify the file at `path` against an expected MD5 digest.
fn verify(path: &Path, expected: &str) -> Result<()> {
    let computed = digest::file_md5(path)?;
    if !computed.eq_ignore_ascii_case(expected) {
        return Err(Error::Integrity {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            computed,
        });
    }
    Ok(())
}


/// An immutable, randomly-indexable collection of
/// (feature vector, class index) pairs loaded from one LIBSVM file.
///
/// All state is established during construction and read-only for the
/// lifetime of the value, so a batching layer may read it from many
/// threads without locking.
#[derive(Debug)]
pub struct SvmDataset {
    category: String,
    local_path: PathBuf,
    data: FeatureMatrix,
    class_map: ClassMap,
    targets: Vec<i64>,
    dimensionality: Option<usize>,
    density: f64,
}


impl SvmDataset {
    /// Start building a dataset from the remote location of its file.
    pub fn from_url<S>(url: S) -> SvmDatasetBuilder
        where S: AsRef<str>,
    {
        SvmDatasetBuilder::new(url)
    }


    /// Returns the `index`-th record as a dense feature vector and
    /// its class index.
    ///
    /// Sparse datasets densify just this one row; dense datasets copy
    /// the row out directly. When a dimensionality was declared, the
    /// vector is right-padded with zeros up to exactly that length.
    /// A row longer than the declared dimensionality fails;
    /// it is never truncated.
    pub fn get(&self, index: usize) -> Result<(Vec<f32>, i64)> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }

        let mut x = self.data.row(index);
        if let Some(dim) = self.dimensionality {
            if x.len() > dim {
                return Err(Error::Config(format!(
                    "declared dimensionality {dim} is smaller than \
                     the actual feature count {}",
                    x.len(),
                )));
            }
            x.resize(dim, 0.0);
        }

        Ok((x, self.targets[index]))
    }


    /// Number of records.
    pub fn len(&self) -> usize {
        self.targets.len()
    }


    /// Returns `true` if the dataset holds no record.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }


    /// Number of classes in the mapping.
    pub fn num_classes(&self) -> usize {
        self.class_map.len()
    }


    /// Feature count of the raw matrix, before any padding.
    pub fn num_features(&self) -> usize {
        self.data.shape().1
    }


    /// The class mapping built at load time.
    pub fn class_map(&self) -> &ClassMap {
        &self.class_map
    }


    /// The classes in index order.
    pub fn classes(&self) -> &[ClassValue] {
        self.class_map.classes()
    }


    /// The remapped class index of every record.
    pub fn targets(&self) -> &[i64] {
        &self.targets
    }


    /// Returns `true` if the sparse representation was retained.
    pub fn is_sparse(&self) -> bool {
        self.data.is_sparse()
    }


    /// Where the file lives in the local cache.
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }


    /// The dataset-family category derived from the URL,
    /// e.g. `binary` or `multiclass`.
    pub fn category(&self) -> &str {
        &self.category
    }


    /// A summary of the loaded dataset.
    pub fn stats(&self) -> DatasetStats {
        let file = self.local_path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        DatasetStats {
            file,
            category: self.category.clone(),
            records: self.len(),
            features: self.num_features(),
            classes: self.num_classes(),
            sparse: self.is_sparse(),
            density: self.density,
        }
    }
}


/// Summary of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    /// Cached file name.
    pub file: String,
    /// Dataset-family category.
    pub category: String,
    /// Number of records.
    pub records: usize,
    /// Raw feature count.
    pub features: usize,
    /// Number of classes.
    pub classes: usize,
    /// Whether the sparse representation was retained.
    pub sparse: bool,
    /// Non-zero density of the raw matrix.
    pub density: f64,
}


impl fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset: {} ({})", self.file, self.category)?;
        writeln!(f, "  Records:  {}", self.records)?;
        writeln!(f, "  Features: {}", self.features)?;
        writeln!(f, "  Classes:  {}", self.classes)?;
        writeln!(
            f,
            "  Storage:  {} (density {:.4})",
            if self.sparse { "sparse" } else { "dense" },
            self.density,
        )
    }
}
