use futures::future;
use futures::stream::{self, StreamExt, TryStreamExt};
use sitemill_core::{ChangeFrequency, Entry, LastModified, Location, Priority};
use sitemill_writer::{validate_source_name, EntryStream, SitemapSource, WriterError};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;

// One entry per line, optional fields separated by tabs, `-` leaves a field out:
//
//   # url                           changefreq  priority  lastmod
//   https://example.com/            daily       1.0       2024-05-01
//   https://example.com/about       -           0.3
//   https://example.com/contact

/// A source reading its entries lazily from a URL-list file.
#[derive(Debug, Clone)]
pub(crate) struct UrlListSource {
    name: String,
    path: PathBuf,
}

impl UrlListSource {
    pub(crate) fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self, WriterError> {
        let name = name.into();
        validate_source_name(&name)?;
        Ok(UrlListSource {
            name,
            path: path.into(),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl SitemapSource for UrlListSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> EntryStream<'_> {
        let path = self.path.clone();
        let file_name = self.path.display().to_string();

        stream::once(async move {
            let file = File::open(&path).await.map_err(|e| {
                WriterError::Source(format!("cannot open {}: {}", file_name, e))
            })?;
            let lines = LinesStream::new(BufReader::new(file).lines());
            Ok::<_, WriterError>(lines.enumerate().filter_map(move |(index, line)| {
                future::ready(parse_line(&file_name, index + 1, line))
            }))
        })
        .try_flatten()
        .boxed()
    }
}

/// `None` for blank and comment lines.
fn parse_line(
    file_name: &str,
    line_number: usize,
    line: std::io::Result<String>,
) -> Option<Result<Entry, WriterError>> {
    let line = match line {
        Ok(line) => line,
        Err(e) => {
            return Some(Err(WriterError::Source(format!(
                "{}:{}: read failed: {}",
                file_name, line_number, e
            ))))
        }
    };

    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    Some(parse_fields(trimmed).map_err(|reason| {
        WriterError::Source(format!("{}:{}: {}", file_name, line_number, reason))
    }))
}

fn parse_fields(line: &str) -> Result<Entry, String> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() > 4 {
        return Err(format!("expected at most 4 tab-separated fields, found {}", fields.len()));
    }

    let location = Location::new(fields[0]).map_err(|e| e.to_string())?;
    let mut entry = Entry::new(location);

    if let Some(value) = optional_field(&fields, 1) {
        let frequency = value
            .parse::<ChangeFrequency>()
            .map_err(|e| e.to_string())?;
        entry = entry.with_change_frequency(frequency);
    }
    if let Some(value) = optional_field(&fields, 2) {
        let number: f64 = value
            .parse()
            .map_err(|_| format!("priority '{}' is not a number", value))?;
        entry = entry.with_priority(Priority::new(number).map_err(|e| e.to_string())?);
    }
    if let Some(value) = optional_field(&fields, 3) {
        let date = value
            .parse::<LastModified>()
            .map_err(|e| e.to_string())?;
        entry = entry.with_last_modified(date);
    }
    Ok(entry)
}

fn optional_field<'a>(fields: &[&'a str], index: usize) -> Option<&'a str> {
    fields
        .get(index)
        .copied()
        .filter(|value| !value.is_empty() && *value != "-")
}
