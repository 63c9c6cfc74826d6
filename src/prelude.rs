//! Exports the items needed to acquire and read a dataset.
//! 
pub use crate::error::{
    Error,
    Result,
};


pub use crate::dataset::{
    // The record accessor and its builder
    SvmDataset,
    SvmDatasetBuilder,

    DatasetStats,
};


pub use crate::catalog::{
    self,

    Source,
    Split,
};


pub use crate::cache::CacheConfig;


pub use crate::labels::{
    ClassMap,
    ClassValue,
};


pub use crate::matrix::{
    CsrMatrix,
    FeatureMatrix,
};


pub use crate::loader::Labels;
