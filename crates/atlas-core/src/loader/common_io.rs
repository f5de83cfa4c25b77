// crates/atlas-core/src/loader/common_io.rs
use crate::error::LoadError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Opens a snapshot, buffers it, and unwraps gzip when the file name says so.
/// Returns a generic Reader so the caller doesn't care about the compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::Snapshot {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let reader = BufReader::new(file);

    if !is_gzip(path) {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(LoadError::Snapshot {
            path: path.display().to_string(),
            message: "gzip snapshot requested but 'compact' is disabled".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_a_snapshot_error() {
        let err = open_stream(Path::new("/definitely/not/here.json")).err();
        assert!(matches!(err, Some(LoadError::Snapshot { .. })));
    }

    #[cfg(feature = "compact")]
    #[test]
    fn gzip_snapshots_are_decoded() {
        use flate2::{write::GzEncoder, Compression};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.json.gz");
        let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        enc.write_all(b"[]").unwrap();
        enc.finish().unwrap();

        let mut out = String::new();
        open_stream(&path).unwrap().read_to_string(&mut out).unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn plain_snapshots_are_passed_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.json");
        File::create(&path).unwrap().write_all(b"[1]").unwrap();

        let mut out = String::new();
        open_stream(&path).unwrap().read_to_string(&mut out).unwrap();
        assert_eq!(out, "[1]");
    }
}
