use crate::http::HttpClient;
use crate::SpiderError;
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, trace};

/// GET request a file from `url` and stream it to `path`, returning the
/// number of bytes written.
///
/// Parent directories of `path` are created as necessary. Any status other
/// than 2xx is an error, and nothing is written.
pub async fn download_file(
    http_client: &HttpClient,
    url: &str,
    query: &[(&str, &str)],
    path: &Path,
    tui: bool,
) -> Result<u64, SpiderError> {
    let mut response = http_client.get(url).query(query).send().await?;
    if !response.status().is_success() {
        return Err(SpiderError::Status(response.status()));
    }
    let file_size = response.content_length().unwrap_or(0);

    // ensure the directory exists
    trace!("checking directory path: {:?}", path);
    if let Some(dir_path) = path.parent() {
        tokio::fs::create_dir_all(dir_path).await?;
    }

    // progress bar
    let pb = if tui {
        download_bar(file_size)
    } else {
        ProgressBar::hidden()
    };
    pb.set_message(format!("downloading {} ...", path.display()));

    // write each chunk as it arrives
    let mut file = File::create(path).await?;
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
        pb.inc(chunk.len() as u64);
    }
    file.flush().await?;

    pb.finish_and_clear();
    debug!("{written} bytes downloaded to {}", path.display());

    Ok(written)
}

fn download_bar(file_size: u64) -> ProgressBar {
    let style = ProgressStyle::default_bar().template(
        "{msg} {spinner:.magenta}\n\
        [{elapsed_precise:.magenta}] |{bar:40.cyan/blue}| {bytes}/{total_bytes} \
        [Rate: {bytes_per_sec:.magenta}, ETA: {eta:.blue}]",
    );
    match style {
        Ok(style) => {
            let pb = ProgressBar::new(file_size).with_style(style.progress_chars("##-"));
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        }
        Err(err) => {
            error!("failed to build progress bar, error({err})");
            ProgressBar::hidden()
        }
    }
}

/// Extract a single named entry of the `.zip` file at `zip_file` into
/// `to_dir`, returning the path of the extracted file.
///
/// `to_dir` is created if it does not exist.
pub fn unzip_file(zip_file: &Path, name: &str, to_dir: &Path) -> Result<PathBuf, SpiderError> {
    debug!("unzipping {name} from {} to {}", zip_file.display(), to_dir.display());

    let file = std::fs::File::open(zip_file)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|err| {
        error!("failed to open zip file at {}, {}", zip_file.display(), err);
        err
    })?;
    let mut entry = archive.by_name(name)?;

    std::fs::create_dir_all(to_dir)?;
    let outpath = to_dir.join(name);
    let mut outfile = std::fs::File::create(&outpath)?;
    trace!("copying {} to {}", entry.name(), outpath.display());
    std::io::copy(&mut entry, &mut outfile)?;

    info!("{name} extracted to {}", outpath.display());

    Ok(outpath)
}

/// A row that can be written to a CSV table.
///
/// `HEADER` is written first, so an empty table still carries its columns.
pub trait Record: Serialize {
    const HEADER: &'static [&'static str];
}

/// Write `rows` to `path` as CSV, with a header row and no index column.
///
/// Parent directories are created as necessary; an existing file is
/// overwritten.
pub fn write_csv<T: Record>(rows: &[T], path: &Path) -> Result<(), SpiderError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(T::HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// [`write_csv`], logging instead of returning any failure.
///
/// Check the log (or the file system) to tell a failed save from a
/// successful one.
pub fn save_csv<T: Record>(rows: &[T], path: &Path) {
    match write_csv(rows, path) {
        Ok(()) => trace!("{} rows saved to {}", rows.len(), path.display()),
        Err(err) => error!("failed to save CSV to {}, error({err})", path.display()),
    }
}

/// Read a CSV table with a header row from `path`.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SpiderError> {
    trace!("reading file path: {}", path.display());
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
