use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{DOMAIN_EXTENSIONS, TABLE_EXTENSIONS};

// os
#[cfg(not(windows))]
const TICK_SETTINGS: (&str, u64) = ("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ", 80);
#[cfg(windows)]
const TICK_SETTINGS: (&str, u64) = (r"+-x| ", 200);

/// row-counting progress bar; hidden when there is nothing to count
pub fn get_progress_bar(rows: u64, msg: &str) -> ProgressBar {
    if rows == 0 {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_bar()
        .tick_chars(TICK_SETTINGS.0)
        .template(" {spinner} {msg:<30} {wide_bar} {human_pos}/{human_len} rows ETA {eta} ")
        .unwrap_or_else(|_| ProgressStyle::default_bar());

    let progress_bar = ProgressBar::new(rows).with_style(style);
    progress_bar.set_message(msg.to_owned());
    progress_bar.enable_steady_tick(Duration::from_millis(TICK_SETTINGS.1));

    progress_bar
}

/// write any collection of lines to a file
pub fn write_collection<T, P>(data: &[T], fname: P) -> Result<(), CliError>
where
    T: AsRef<str>,
    P: AsRef<Path>,
{
    log::info!(
        "Lines in {}: {:?}. Writing...",
        fname.as_ref().display(),
        data.len()
    );

    let mut writer = BufWriter::new(File::create(fname.as_ref())?);
    for line in data.iter() {
        writeln!(writer, "{}", line.as_ref())?;
    }
    writer.flush()?;

    Ok(())
}

/// argument checker for all subcommands
pub trait ArgCheck {
    fn check(&self) -> Result<(), CliError> {
        self.validate_args()
    }

    fn validate_args(&self) -> Result<(), CliError> {
        self.check_tables()?;

        if let Some(domains) = self.get_domains() {
            validate(domains, &DOMAIN_EXTENSIONS)?;
        } else {
            log::warn!("No domain configuration provided. Using built-in domains only...");
        };

        self.check_outdir()
    }

    fn check_tables(&self) -> Result<(), CliError> {
        validate(self.get_variants(), &TABLE_EXTENSIONS)?;
        validate(self.get_gene_matrix(), &TABLE_EXTENSIONS)?;

        Ok(())
    }

    fn check_outdir(&self) -> Result<(), CliError> {
        let outdir = self.get_outdir();
        if outdir.exists() && !outdir.is_dir() {
            return Err(CliError::InvalidInput(format!(
                "ERROR: {:?} exists and is not a directory",
                outdir
            )));
        }

        Ok(())
    }

    fn get_variants(&self) -> &PathBuf;
    fn get_gene_matrix(&self) -> &PathBuf;
    fn get_domains(&self) -> Option<&PathBuf>;
    fn get_outdir(&self) -> &PathBuf;
}

/// error handling for CLI
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// argument validation
pub fn validate(arg: &PathBuf, extensions: &[&str]) -> Result<(), CliError> {
    if !arg.exists() {
        return Err(CliError::InvalidInput(format!(
            "ERROR: {:?} does not exist",
            arg
        )));
    }

    if !arg.is_file() {
        return Err(CliError::InvalidInput(format!(
            "ERROR: {:?} is not a file",
            arg
        )));
    }

    match arg.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if extensions.contains(&ext) => (),
        _ => {
            return Err(CliError::InvalidInput(format!(
                "ERROR: file {:?} does not end with any of {:?}",
                arg, extensions
            )))
        }
    }

    match std::fs::metadata(arg) {
        Ok(metadata) if metadata.len() == 0 => Err(CliError::InvalidInput(format!(
            "ERROR: file {:?} is empty",
            arg
        ))),
        Ok(_) => Ok(()),
        Err(e) => Err(CliError::IoError(e)),
    }
}
