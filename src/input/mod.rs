use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use flate2::read::GzDecoder;
use crate::error::EvalError;

/// Opens a peer log for line-wise reading. Rotated logs compressed with
/// gzip (`*.gz`) are decompressed on the fly.
pub fn open_log_file(path: &Path) -> Result<Box<dyn BufRead>, EvalError> {
    let display = path.display().to_string();

    let file = File::open(path).map_err(|error| EvalError::from_open_error(&display, error))?;

    let is_gzip = path.extension().map_or(false, |extension| extension == "gz");

    if is_gzip {
        debug!("reading {} as gzip", display);
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io::Write;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use super::*;

    #[test]
    fn test_read_plain() {
        let input = open_log_file(Path::new("src/test/search-pool-2.log")).unwrap();

        assert_eq!(input.lines().count(), 2);
    }

    #[test]
    fn test_read_gzip() {
        let directory = env::temp_dir().join(format!("p2p_eval-input-{}", std::process::id()));
        fs::create_dir_all(&directory).unwrap();
        let path = directory.join("55001_client.log.gz");

        {
            let file = File::create(&path).unwrap();
            let mut encoder = GzEncoder::new(file, Compression::default());
            encoder.write_all(b"!1 [5] search request sent [start]\n").unwrap();
            encoder.write_all(b"!1 [9] search request answered [end]\n").unwrap();
            encoder.finish().unwrap();
        }

        let lines: Vec<String> = open_log_file(&path)
            .unwrap()
            .lines()
            .map(|line| line.unwrap())
            .collect();

        assert_eq!(
            lines,
            vec![
                String::from("!1 [5] search request sent [start]"),
                String::from("!1 [9] search request answered [end]"),
            ]
        );

        fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn test_missing_file() {
        match open_log_file(Path::new("src/test/does-not-exist.log")) {
            Err(EvalError::FileNotFound { path }) => {
                assert_eq!(path, "src/test/does-not-exist.log")
            }
            Err(other) => panic!("unexpected error {:?}", other),
            Ok(_) => panic!("opened a missing file"),
        }
    }
}
