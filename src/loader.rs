//! LIBSVM text reading.
//!
//! This module is the boundary between the dataset core and the text
//! format itself: everything downstream of [`parse`] works on a sparse
//! matrix plus labels and never touches raw text or compressed bytes.
//!
//! Each line of a LIBSVM format file has the form
//! ```txt
//! label index:value index:value ...
//! ```
//! where `label` is the target value, `index` is a 1-indexed feature
//! index, and `value` the feature value at that index. Multilabel
//! files carry a comma-separated (possibly empty) list of labels in
//! the first field instead of a single value.
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::matrix::CsrMatrix;


/// Labels attached to the parsed records.
#[derive(Debug, Clone, PartialEq)]
pub enum Labels {
    /// One scalar label per record.
    Scalar(Vec<f64>),
    /// One (possibly empty) label set per record.
    Sets(Vec<Vec<f64>>),
}


impl Labels {
    /// Number of records the labels cover.
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(ys) => ys.len(),
            Self::Sets(sets) => sets.len(),
        }
    }


    /// Returns `true` if no record was parsed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


/// Parse the LIBSVM format file at `path` into a sparse row matrix
/// and its labels.
///
/// Feature indices are 1-indexed in the file and normalized to
/// 0-indexed here; an index of `0` is rejected rather than silently
/// shifting the matrix. Blank lines and lines starting with `#` are
/// skipped. The feature count is the largest feature index observed
/// anywhere in the file.
///
/// Files ending in `.bz2` or `.gz` are decompressed on the fly.
pub fn parse<P>(path: P, multilabel: bool) -> Result<(CsrMatrix, Labels)>
    where P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = open(path)?;

    let mut rows: Vec<Vec<(usize, f64)>> = Vec::new();
    let mut scalars: Vec<f64> = Vec::new();
    let mut sets: Vec<Vec<f64>> = Vec::new();
    let mut n_feature = 0_usize;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = lineno + 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut words = trimmed.split_whitespace().peekable();

        if multilabel {
            // An empty label set leaves the features as the first
            // token, recognizable by its `:` separator.
            let empty = words.peek().is_some_and(|w| w.contains(':'));
            if empty {
                sets.push(Vec::new());
            } else {
                let field = words.next().unwrap();
                sets.push(parse_label_list(path, lineno, field)?);
            }
        } else {
            let field = words.next().ok_or_else(|| Error::Parse {
                path: path.to_path_buf(),
                line: lineno,
                msg: "missing label field".into(),
            })?;
            scalars.push(parse_number(path, lineno, field, "label")?);
        }

        let mut row = Vec::new();
        for word in words {
            let (index, value) = index_and_value(path, lineno, word)?;
            n_feature = n_feature.max(index + 1);
            row.push((index, value));
        }
        rows.push(row);
    }

    let matrix = CsrMatrix::from_rows(rows, n_feature);
    let labels = if multilabel {
        Labels::Sets(sets)
    } else {
        Labels::Scalar(scalars)
    };

    Ok((matrix, labels))
}


/// Open `path`, decompressing `.bz2` and `.gz` files transparently.
fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;

    let reader: Box<dyn Read> = match path.extension().and_then(|e| e.to_str()) {
        Some("bz2") => Box::new(bzip2::read::BzDecoder::new(file)),
        Some("gz") => Box::new(flate2::read::GzDecoder::new(file)),
        _ => Box::new(file),
    };
    Ok(Box::new(BufReader::new(reader)))
}


/// Parse an `index:value` pair,
/// normalizing the 1-indexed file index to 0-indexed.
fn index_and_value(path: &Path, lineno: usize, word: &str)
    -> Result<(usize, f64)>
{
    let (i, x) = word.split_once(':').ok_or_else(|| Error::Parse {
        path: path.to_path_buf(),
        line: lineno,
        msg: format!("expected `index:value`, found `{word}`"),
    })?;

    let index = i.trim().parse::<usize>().map_err(|_| Error::Parse {
        path: path.to_path_buf(),
        line: lineno,
        msg: format!("invalid feature index `{i}`"),
    })?;
    if index == 0 {
        return Err(Error::Parse {
            path: path.to_path_buf(),
            line: lineno,
            msg: "feature indices are 1-indexed; found index 0".into(),
        });
    }
    let value = parse_number(path, lineno, x, "feature value")?;

    Ok((index - 1, value))
}


/// Parse a comma-separated multilabel field such as `1,7` or `3`.
fn parse_label_list(path: &Path, lineno: usize, field: &str)
    -> Result<Vec<f64>>
{
    field.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_number(path, lineno, s, "label"))
        .collect()
}


fn parse_number(path: &Path, lineno: usize, s: &str, what: &str)
    -> Result<f64>
{
    s.trim().parse::<f64>().map_err(|_| Error::Parse {
        path: path.to_path_buf(),
        line: lineno,
        msg: format!("invalid {what} `{s}`"),
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, text: &str)
        -> std::path::PathBuf
    {
        let path = dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }


    #[test]
    fn scalar_labels_and_indices() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "toy.txt",
            "+1 1:1.5 3:2.0\n\n# comment\n-1 2:0.5\n",
        );

        let (matrix, labels) = parse(&path, false).unwrap();
        assert_eq!(matrix.shape(), (2, 3));
        assert_eq!(labels, Labels::Scalar(vec![1.0, -1.0]));

        // 1-indexed in the file, 0-indexed in the matrix.
        assert_eq!(matrix.row_dense(0), vec![1.5, 0.0, 2.0]);
        assert_eq!(matrix.row_dense(1), vec![0.0, 0.5, 0.0]);
    }


    #[test]
    fn multilabel_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "toy.txt",
            "1,2 1:0.5\n2 2:1.0\n1:2.0\n",
        );

        let (matrix, labels) = parse(&path, true).unwrap();
        assert_eq!(matrix.shape(), (3, 2));
        assert_eq!(
            labels,
            Labels::Sets(vec![vec![1.0, 2.0], vec![2.0], vec![]]),
        );
    }


    #[test]
    fn zero_index_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "toy.txt", "+1 0:1.0\n");

        let err = parse(&path, false).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }


    #[test]
    fn malformed_pair_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "toy.txt", "+1 1:1.0\n-1 oops\n");

        let err = parse(&path, false).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }


    #[test]
    fn gzip_is_transparent() {
        use flate2::Compression;
        use flate2::write::GzEncoder;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toy.txt.gz");

        let file = File::create(&path).unwrap();
        let mut enc = GzEncoder::new(file, Compression::default());
        enc.write_all(b"5 1:1.0 4:2.0\n1 2:0.5\n").unwrap();
        enc.finish().unwrap();

        let (matrix, labels) = parse(&path, false).unwrap();
        assert_eq!(matrix.shape(), (2, 4));
        assert_eq!(labels, Labels::Scalar(vec![5.0, 1.0]));
    }


    #[test]
    fn bzip2_is_transparent() {
        use bzip2::Compression;
        use bzip2::write::BzEncoder;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toy.txt.bz2");

        let file = File::create(&path).unwrap();
        let mut enc = BzEncoder::new(file, Compression::default());
        enc.write_all(b"5 1:1.0 4:2.0\n1 2:0.5\n").unwrap();
        enc.finish().unwrap();

        let (matrix, labels) = parse(&path, false).unwrap();
        assert_eq!(matrix.shape(), (2, 4));
        assert_eq!(labels, Labels::Scalar(vec![5.0, 1.0]));
    }
}
