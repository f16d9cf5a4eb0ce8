//! reading and writing of schedule, network and vehicle documents. files are JSON,
//! gzip-compressed when the filename ends with `.gz`.
use csv::QuoteStyle;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error("failure reading {0}: {1}")]
    ReadError(String, String),
    #[error("failure decoding {0}: {1}")]
    DecodeError(String, String),
    #[error("failure writing {0}: {1}")]
    WriteError(String, String),
    #[error("file {0} already exists and overwrite is not enabled")]
    FileExists(String),
}

fn is_gzip(file: &str) -> bool {
    file.ends_with(".gz")
}

/// deserializes a JSON document from `file`
pub fn read_json<T: DeserializeOwned>(file: &str) -> Result<T, IoError> {
    let handle = File::open(file).map_err(|e| IoError::ReadError(file.to_string(), e.to_string()))?;
    let reader: Box<dyn Read> = if is_gzip(file) {
        Box::new(GzDecoder::new(handle))
    } else {
        Box::new(handle)
    };
    serde_json::from_reader(BufReader::new(reader))
        .map_err(|e| IoError::DecodeError(file.to_string(), e.to_string()))
}

/// a file being written, gzip-compressed when the filename ends with `.gz`.
/// [`OutputFile::finish`] must be called once everything is written.
pub enum OutputFile {
    Plain(File),
    Gzip(GzEncoder<File>),
}

impl OutputFile {
    /// completes the file. for gzip output this writes the trailer, which may fail.
    pub fn finish(self) -> std::io::Result<()> {
        match self {
            OutputFile::Plain(mut handle) => handle.flush(),
            OutputFile::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for OutputFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            OutputFile::Plain(handle) => handle.write(buf),
            OutputFile::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            OutputFile::Plain(handle) => handle.flush(),
            OutputFile::Gzip(encoder) => encoder.flush(),
        }
    }
}

/// serializes `value` as a JSON document into `file`. an existing file is only
/// replaced when `overwrite` is set.
pub fn write_json<T: Serialize>(value: &T, file: &str, overwrite: bool) -> Result<(), IoError> {
    let mut writer = BufWriter::new(create_output(file, overwrite)?);
    serde_json::to_writer(&mut writer, value)
        .map_err(|e| IoError::WriteError(file.to_string(), e.to_string()))?;
    let output = writer
        .into_inner()
        .map_err(|e| IoError::WriteError(file.to_string(), e.to_string()))?;
    output
        .finish()
        .map_err(|e| IoError::WriteError(file.to_string(), e.to_string()))
}

/// builds a csv writer for `file` while respecting the user's overwrite preference.
/// gzip compression is applied when the filename ends with `.gz`. close it with
/// [`finish_csv_writer`].
pub fn create_csv_writer(
    file: &str,
    has_headers: bool,
    quote_style: QuoteStyle,
    overwrite: bool,
) -> Result<csv::Writer<OutputFile>, IoError> {
    let output = create_output(file, overwrite)?;
    let writer = csv::WriterBuilder::new()
        .has_headers(has_headers)
        .quote_style(quote_style)
        .from_writer(output);
    Ok(writer)
}

/// flushes the remaining records of a csv writer and completes its file
pub fn finish_csv_writer(writer: csv::Writer<OutputFile>, file: &str) -> Result<(), IoError> {
    let output = writer
        .into_inner()
        .map_err(|e| IoError::WriteError(file.to_string(), e.to_string()))?;
    output
        .finish()
        .map_err(|e| IoError::WriteError(file.to_string(), e.to_string()))
}

fn create_output(file: &str, overwrite: bool) -> Result<OutputFile, IoError> {
    if Path::new(file).exists() && !overwrite {
        return Err(IoError::FileExists(file.to_string()));
    }
    let handle =
        File::create(file).map_err(|e| IoError::WriteError(file.to_string(), e.to_string()))?;
    if is_gzip(file) {
        Ok(OutputFile::Gzip(GzEncoder::new(handle, Compression::default())))
    } else {
        Ok(OutputFile::Plain(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Schedule, Stop, StopId};
    use geo::Coord;
    use std::sync::Arc;

    fn schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.add_stop(Arc::new(Stop::new(
            StopId::from("s0"),
            Coord { x: 8.5, y: 47.25 },
        )));
        schedule
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().expect("test invariant failed: unable to create temp dir");
        for name in ["schedule.json", "schedule.json.gz"] {
            let file = dir.path().join(name);
            let file = file.to_str().unwrap();
            write_json(&schedule(), file, false).unwrap();
            let read: Schedule = read_json(file).unwrap();
            assert_eq!(read, schedule());
        }
    }

    #[test]
    fn test_write_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("schedule.json");
        let file = file.to_str().unwrap();
        write_json(&schedule(), file, false).unwrap();
        let result = write_json(&schedule(), file, false);
        assert!(matches!(result, Err(IoError::FileExists(_))));
        write_json(&schedule(), file, true).unwrap();
    }

    #[test]
    fn test_read_missing_file() {
        let result: Result<Schedule, IoError> = read_json("does/not/exist.json");
        assert!(matches!(result, Err(IoError::ReadError(_, _))));
    }

    #[test]
    fn test_gzip_csv_is_complete_after_finish() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.csv.gz");
        let file = file.to_str().unwrap();
        let mut writer = create_csv_writer(file, true, QuoteStyle::Necessary, false).unwrap();
        writer.write_record(["stage", "routes"]).unwrap();
        writer.write_record(["1", "42"]).unwrap();
        finish_csv_writer(writer, file).unwrap();

        let mut decoded = String::new();
        GzDecoder::new(File::open(file).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "stage,routes\n1,42\n");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_gzip_write_is_reported() {
        if !Path::new("/dev/full").exists() {
            return;
        }
        // every write to /dev/full fails with ENOSPC
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("schedule.json.gz");
        std::os::unix::fs::symlink("/dev/full", &file).unwrap();
        let file = file.to_str().unwrap();
        let result = write_json(&schedule(), file, true);
        assert!(matches!(result, Err(IoError::WriteError(_, _))));

        let mut writer = create_csv_writer(file, true, QuoteStyle::Necessary, true).unwrap();
        writer.write_record(["stage", "routes"]).unwrap();
        let result = finish_csv_writer(writer, file);
        assert!(matches!(result, Err(IoError::WriteError(_, _))));
    }
}
