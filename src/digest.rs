//! Streaming digest of cached dataset files.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;


/// Size of a single read when hashing a file.
const CHUNK_SIZE: usize = 64 * 1024;


/// Compute the MD5 digest of the file at `path`,
/// returned as a lowercase hex string.
///
/// The file is read in 64 KiB chunks and folded into a streaming hash
/// state, so arbitrarily large files are hashed in constant memory.
/// This function has no side effects beyond reading the file.
pub fn file_md5<P>(path: P) -> Result<String>
    where P: AsRef<Path>,
{
    let mut file = File::open(path)?;
    let mut context = md5::Context::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        context.consume(&buf[..n]);
    }

    Ok(format!("{:x}", context.compute()))
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn known_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc.txt");
        std::fs::write(&path, b"abc").unwrap();

        // Reference value from RFC 1321.
        let digest = file_md5(&path).unwrap();
        assert_eq!(digest, "900150983cd24fb0d6963f7d28e17f72");
    }


    #[test]
    fn deterministic_across_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, vec![7u8; 3 * CHUNK_SIZE + 17]).unwrap();

        assert_eq!(file_md5(&path).unwrap(), file_md5(&path).unwrap());
    }


    #[test]
    fn single_byte_flip_changes_digest() {
        use rand::Rng;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");

        let mut rng = rand::thread_rng();
        let mut bytes = vec![0u8; 2 * CHUNK_SIZE];
        rng.fill(&mut bytes[..]);
        std::fs::write(&path, &bytes).unwrap();
        let before = file_md5(&path).unwrap();

        for _ in 0..10 {
            let mut mutated = bytes.clone();
            let pos = rng.gen_range(0..mutated.len());
            mutated[pos] ^= 1 << rng.gen_range(0..8);

            let mut f = File::create(&path).unwrap();
            f.write_all(&mutated).unwrap();
            drop(f);

            assert_ne!(before, file_md5(&path).unwrap());
        }
    }
}
