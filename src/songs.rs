//! Song CSV input and clustered-song output
//!
//! Input files carry a header row naming their columns. The first two
//! columns hold the title and artist; the audio features are located by
//! name, case-insensitively. Output files hold `Title,Artist,Cluster`.

use crate::error::{KMeansError, Result};
use clap::ValueEnum;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use ndarray::{Array2, ArrayView1};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Header names of the feature columns, in feature-vector order:
/// danceability, energy, loudness, valence, tempo
pub const FEATURE_NAMES: [&str; 5] = ["danceability", "energy", "db", "valence", "bpm"];

const N_FEATURES: usize = FEATURE_NAMES.len();

/// Songs loaded from a CSV file, index-aligned across fields
#[derive(Debug, Clone, PartialEq)]
pub struct SongTable {
    pub titles: Vec<String>,
    pub artists: Vec<String>,
    /// Feature matrix of shape (n_songs, 5), columns ordered as `FEATURE_NAMES`
    pub features: Array2<f64>,
}

impl SongTable {
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Why a single data row was skipped
#[derive(Error, Debug)]
enum RowError {
    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("{column} value {value:?} is not a finite number")]
    BadNumber { column: &'static str, value: String },
}

/// Load songs from a CSV file. See [`read_songs`].
pub fn load_songs<P: AsRef<Path>>(path: P) -> Result<SongTable> {
    let file = File::open(path)?;
    read_songs(file)
}

/// Read songs from CSV text.
///
/// The delimiter is `;` if the header contains one, `,` otherwise. Rows that
/// lack a field or hold a non-numeric feature are logged and skipped.
///
/// # Errors
///
/// - `EmptyInput` if there is no header row
/// - `MissingColumns` if a feature column is absent from the header
/// - `Io` if the underlying reader fails
pub fn read_songs<R: Read>(reader: R) -> Result<SongTable> {
    let mut reader = BufReader::new(reader);

    let mut header = String::new();
    reader.read_line(&mut header)?;
    let header = header.strip_prefix('\u{feff}').unwrap_or(&header);
    if header.trim().is_empty() {
        return Err(KMeansError::EmptyInput);
    }

    let delimiter = if header.contains(';') { b';' } else { b',' };
    let columns = parse_header(header, delimiter)?;
    let feature_indices = locate_features(&columns)?;

    debug!(
        delimiter = %char::from(delimiter),
        columns = ?columns,
        "Parsed CSV header"
    );

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut titles = Vec::new();
    let mut artists = Vec::new();
    let mut flat_features = Vec::new();
    let mut skipped = 0usize;

    for record in rdr.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line() + 1);
                warn!(line = ?line, error = %e, "Skipping unreadable row");
                skipped += 1;
                continue;
            }
        };

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        match parse_row(&record, &feature_indices) {
            Ok((title, artist, features)) => {
                titles.push(title);
                artists.push(artist);
                flat_features.extend_from_slice(&features);
            }
            Err(e) => {
                let line = record.position().map(|p| p.line() + 1);
                let raw = record
                    .iter()
                    .collect::<Vec<_>>()
                    .join(&char::from(delimiter).to_string());
                warn!(line = ?line, row = %raw, error = %e, "Skipping malformed row");
                skipped += 1;
            }
        }
    }

    debug!(loaded = titles.len(), skipped, "Finished reading songs");

    let features = Array2::from_shape_vec((titles.len(), N_FEATURES), flat_features)
        .map_err(|e| KMeansError::InvalidDimensions(e.to_string()))?;

    Ok(SongTable {
        titles,
        artists,
        features,
    })
}

/// Split the header line and normalize the names to trimmed lowercase
fn parse_header(header: &str, delimiter: u8) -> Result<Vec<String>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_reader(header.as_bytes());

    let record = rdr.records().next().ok_or(KMeansError::EmptyInput)??;

    Ok(record
        .iter()
        .map(|name| name.trim().to_lowercase())
        .collect())
}

/// Column index of every feature, in `FEATURE_NAMES` order.
///
/// A name that appears more than once resolves to its last column.
fn locate_features(columns: &[String]) -> Result<[usize; N_FEATURES]> {
    let mut indices = [0usize; N_FEATURES];
    let mut missing = Vec::new();

    for (slot, name) in indices.iter_mut().zip(FEATURE_NAMES) {
        match columns.iter().rposition(|c| c == name) {
            Some(idx) => *slot = idx,
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(KMeansError::MissingColumns {
            missing,
            found: columns.to_vec(),
        });
    }

    Ok(indices)
}

fn parse_row(
    record: &StringRecord,
    feature_indices: &[usize; N_FEATURES],
) -> std::result::Result<(String, String, [f64; N_FEATURES]), RowError> {
    let title = record.get(0).ok_or(RowError::MissingField("title"))?;
    let artist = record.get(1).ok_or(RowError::MissingField("artist"))?;

    let mut features = [0.0; N_FEATURES];
    for ((value, &idx), column) in features.iter_mut().zip(feature_indices).zip(FEATURE_NAMES) {
        let raw = record.get(idx).ok_or(RowError::MissingField(column))?.trim();
        *value = raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RowError::BadNumber {
                column,
                value: raw.to_string(),
            })?;
    }

    Ok((title.trim().to_string(), artist.trim().to_string(), features))
}

/// Write `Title,Artist,Cluster` rows to a file. See [`write_clustered_songs_to`].
pub fn write_clustered_songs<P: AsRef<Path>>(
    path: P,
    songs: &SongTable,
    labels: &ArrayView1<usize>,
) -> Result<()> {
    let file = File::create(path)?;
    write_clustered_songs_to(file, songs, labels)
}

/// Write one `"title","artist",label` row per song under a
/// `Title,Artist,Cluster` header.
///
/// # Errors
///
/// Returns `InvalidDimensions` if there is not exactly one label per song.
pub fn write_clustered_songs_to<W: Write>(
    mut writer: W,
    songs: &SongTable,
    labels: &ArrayView1<usize>,
) -> Result<()> {
    check_label_count(songs, labels)?;

    writer.write_all(b"Title,Artist,Cluster\n")?;

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    for ((title, artist), label) in songs.titles.iter().zip(&songs.artists).zip(labels) {
        let label = label.to_string();
        wtr.write_record([title.as_str(), artist.as_str(), label.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Ordering applied to recommended songs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Keep the order of the input file
    #[default]
    #[value(name = "none")]
    Unsorted,
    TitleAsc,
    TitleDesc,
    ArtistAsc,
    ArtistDesc,
}

/// A song picked by [`recommend`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub cluster: usize,
}

/// Select every song whose label is one of `clusters`, ordered by `sort`.
///
/// Sorting is stable, so songs with equal keys keep their file order. An
/// empty `clusters` slice selects nothing.
///
/// # Errors
///
/// Returns `InvalidDimensions` if there is not exactly one label per song.
pub fn recommend<'a>(
    songs: &'a SongTable,
    labels: &ArrayView1<usize>,
    clusters: &[usize],
    sort: SortOrder,
) -> Result<Vec<Recommendation<'a>>> {
    check_label_count(songs, labels)?;

    let mut picked: Vec<Recommendation<'a>> = songs
        .titles
        .iter()
        .zip(&songs.artists)
        .zip(labels)
        .filter(|(_, label)| clusters.contains(label))
        .map(|((title, artist), &cluster)| Recommendation {
            title,
            artist,
            cluster,
        })
        .collect();

    match sort {
        SortOrder::Unsorted => {}
        SortOrder::TitleAsc => picked.sort_by(|a, b| a.title.cmp(b.title)),
        SortOrder::TitleDesc => picked.sort_by(|a, b| b.title.cmp(a.title)),
        SortOrder::ArtistAsc => picked.sort_by(|a, b| a.artist.cmp(b.artist)),
        SortOrder::ArtistDesc => picked.sort_by(|a, b| b.artist.cmp(a.artist)),
    }

    debug!(clusters = ?clusters, ?sort, selected = picked.len(), "Selected songs");

    Ok(picked)
}

fn check_label_count(songs: &SongTable, labels: &ArrayView1<usize>) -> Result<()> {
    if labels.len() != songs.len() {
        return Err(KMeansError::InvalidDimensions(format!(
            "{} labels for {} songs",
            labels.len(),
            songs.len()
        )));
    }
    Ok(())
}
