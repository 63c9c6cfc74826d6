//! Descriptors for the datasets hosted on the LIBSVM mirror.
//!
//! Every entry here is pure configuration: a remote location, its MD5
//! checksum, and any fixed class set. The acquisition and loading
//! logic lives in [`crate::dataset`]; adding a dataset means adding a
//! table entry, nothing else.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::SvmDatasetBuilder;
use crate::error::{Error, Result};


/// Base location of the LIBSVM dataset mirror.
const MIRROR: &str =
    "https://www.csie.ntu.edu.tw/~cjlin/libsvmtools/datasets";


/// A named partition of a dataset.
///
/// Not every dataset provides every split;
/// asking for one it does not have is a configuration error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Split {
    /// The training partition.
    Train,
    /// The test partition.
    Test,
    /// The validation partition.
    Val,
}


impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Train => "train",
            Self::Test => "test",
            Self::Val => "val",
        };
        write!(f, "{name}")
    }
}


/// Everything needed to acquire and load one remote dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Remote location of the (compressed) LIBSVM file.
    pub url: String,
    /// Expected MD5 digest of the file as hosted.
    pub md5: Option<String>,
    /// Optional feature-count ceiling to pad every record to.
    pub dimensionality: Option<usize>,
    /// Explicit class set,
    /// for splits that do not observe every class.
    pub classes: Option<Vec<f64>>,
}


impl Source {
    fn new(path: &str, md5: &str) -> Self {
        Self {
            url: format!("{MIRROR}/{path}"),
            md5: Some(md5.to_string()),
            dimensionality: None,
            classes: None,
        }
    }


    /// Start building a dataset from this descriptor.
    /// This method consumes `self`.
    pub fn reader(self) -> SvmDatasetBuilder {
        let mut builder = SvmDatasetBuilder::new(&self.url);
        if let Some(md5) = self.md5 {
            builder = builder.md5(md5);
        }
        if let Some(dim) = self.dimensionality {
            builder = builder.dimensionality(dim);
        }
        if let Some(classes) = self.classes {
            builder = builder.classes(classes);
        }
        builder
    }
}


/// IJCNN1, binary. Provides train, test, and validation splits.
pub fn ijcnn1(split: Split) -> Result<Source> {
    let source = match split {
        Split::Train => Source::new(
            "binary/ijcnn1.tr.bz2",
            "9889c2e9d957dca5304ed2d285f1be6d",
        ),
        Split::Test => Source::new(
            "binary/ijcnn1.t.bz2",
            "66433ab8089acee9e56dc61ac89a2fe2",
        ),
        Split::Val => Source::new(
            "binary/ijcnn1.val.bz2",
            "9940e6f83e00623a5ca993f189ab18d9",
        ),
    };
    Ok(source)
}


/// Covertype, binary. A single file;
/// `scaled` selects the feature-scaled variant.
pub fn covtype_binary(scaled: bool) -> Source {
    if scaled {
        Source::new(
            "binary/covtype.libsvm.binary.scale.bz2",
            "d95f45e15c284005c2c7a4c82e4be102",
        )
    } else {
        Source::new(
            "binary/covtype.libsvm.binary.bz2",
            "0d3439b314ce13e2f8b903b12bb3ea20",
        )
    }
}


/// RCV1, binary. Provides train and test splits.
pub fn rcv1_binary(split: Split) -> Result<Source> {
    let source = match split {
        Split::Train => Source::new(
            "binary/rcv1_train.binary.bz2",
            "1aeda848408e621468c0fe6944d9382f",
        ),
        Split::Test => Source::new(
            "binary/rcv1_test.binary.bz2",
            "d6e3ab397758fb5c036d9cced52aedae",
        ),
        Split::Val => return Err(unavailable("rcv1.binary", split)),
    };
    Ok(source)
}


/// RCV1, multiclass. Provides train and test splits.
///
/// The test split does not observe all 53 classes, so the class set
/// is declared explicitly to keep indices consistent across splits.
pub fn rcv1_multiclass(split: Split) -> Result<Source> {
    let mut source = match split {
        Split::Train => Source::new(
            "multiclass/rcv1_train.multiclass.bz2",
            "b0ce08cd1a4c9e15c887c20acfb0eade",
        ),
        Split::Test => Source::new(
            "multiclass/rcv1_test.multiclass.bz2",
            "68a377cfff6f4a82edac1975b148afd3",
        ),
        Split::Val => return Err(unavailable("rcv1.multiclass", split)),
    };
    source.classes = Some((0..53).map(f64::from).collect());
    Ok(source)
}


/// GISETTE, binary, feature-scaled. Provides train and test splits.
pub fn gisette(split: Split) -> Result<Source> {
    let source = match split {
        Split::Train => Source::new(
            "binary/gisette_scale.bz2",
            "8a8caa1628c98dafec8d5d7bfa67c20b",
        ),
        Split::Test => Source::new(
            "binary/gisette_scale.t.bz2",
            "28033576433100e2db6154920737232b",
        ),
        Split::Val => return Err(unavailable("gisette", split)),
    };
    Ok(source)
}


/// Look up a dataset by name.
///
/// Recognized names: `ijcnn1`, `covtype.binary`, `rcv1.binary`,
/// `rcv1.multiclass`, and `gisette`. Covertype resolves to its scaled
/// variant and ignores the split (it is a single file).
pub fn lookup(name: &str, split: Split) -> Result<Source> {
    match name {
        "ijcnn1" => ijcnn1(split),
        "covtype.binary" => Ok(covtype_binary(true)),
        "rcv1.binary" => rcv1_binary(split),
        "rcv1.multiclass" => rcv1_multiclass(split),
        "gisette" => gisette(split),
        _ => Err(Error::Config(format!("unknown dataset `{name}`"))),
    }
}


fn unavailable(name: &str, split: Split) -> Error {
    Error::Config(format!("dataset `{name}` has no `{split}` split"))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_point_at_the_mirror_categories() {
        let train = ijcnn1(Split::Train).unwrap();
        assert!(train.url.ends_with("/binary/ijcnn1.tr.bz2"));

        let multi = rcv1_multiclass(Split::Test).unwrap();
        assert!(multi.url.contains("/multiclass/"));
    }


    #[test]
    fn explicit_classes_for_rcv1_multiclass() {
        let source = rcv1_multiclass(Split::Train).unwrap();
        let classes = source.classes.unwrap();

        assert_eq!(classes.len(), 53);
        assert_eq!(classes[0], 0.0);
        assert_eq!(classes[52], 52.0);
    }


    #[test]
    fn missing_split_is_a_config_error() {
        assert!(matches!(
            gisette(Split::Val),
            Err(crate::Error::Config(_)),
        ));
        assert!(matches!(
            rcv1_binary(Split::Val),
            Err(crate::Error::Config(_)),
        ));
    }


    #[test]
    fn unknown_name_is_a_config_error() {
        assert!(matches!(
            lookup("news20", Split::Train),
            Err(crate::Error::Config(_)),
        ));
    }


    #[test]
    fn every_entry_carries_a_digest() {
        let sources = [
            ijcnn1(Split::Train).unwrap(),
            ijcnn1(Split::Test).unwrap(),
            ijcnn1(Split::Val).unwrap(),
            covtype_binary(true),
            covtype_binary(false),
            rcv1_binary(Split::Train).unwrap(),
            rcv1_binary(Split::Test).unwrap(),
            rcv1_multiclass(Split::Train).unwrap(),
            rcv1_multiclass(Split::Test).unwrap(),
            gisette(Split::Train).unwrap(),
            gisette(Split::Test).unwrap(),
        ];

        for source in sources {
            let md5 = source.md5.expect("catalog entries are checksummed");
            assert_eq!(md5.len(), 32);
        }
    }
}
