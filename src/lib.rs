#![warn(missing_docs)]

//! 
//! A crate that fetches, verifies, and loads the sparse labeled
//! datasets hosted on the LIBSVM mirror.
//! 
//! A dataset is acquired once into a local cache
//! (`<cache_root>/<category>/<basename>`), checked against its MD5
//! digest, parsed into a sparse row matrix, and exposed as an
//! immutable, randomly-indexable collection of
//! (feature vector, class index) pairs.
//! 
//! Two decisions are made once at load time and fixed afterwards:
//! 
//! - Representation
//!     Matrices whose non-zero density exceeds `0.1` are densified
//!     up front; sparser ones keep their compressed-row structure and
//!     densify one row per access.
//! 
//! - Class indexing
//!     Label values are remapped onto the contiguous range
//!     `0..num_classes`, either from the sorted distinct values
//!     observed in the file or from an explicitly declared class set,
//!     so that splits missing some classes still agree on indices.
//! 
//! ```no_run
//! use svmdata::prelude::*;
//! 
//! fn main() -> svmdata::Result<()> {
//!     let train = catalog::ijcnn1(Split::Train)?
//!         .reader()
//!         .download(true)
//!         .read()?;
//! 
//!     println!("{}", train.stats());
//!     let (x, y) = train.get(0)?;
//!     assert_eq!(x.len(), train.num_features());
//!     assert!((y as usize) < train.num_classes());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod digest;
pub mod cache;
pub mod fetch;
pub mod loader;
pub mod matrix;
pub mod labels;
pub mod dataset;
pub mod catalog;
pub mod prelude;


pub use error::{Error, Result};
pub use cache::CacheConfig;
pub use dataset::{SvmDataset, SvmDatasetBuilder};
pub use catalog::{Source, Split};
