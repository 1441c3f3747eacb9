//! Exported report files: a path, a directory, a glob pattern, or `-` for stdin

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::Report;
use crate::error::AppError;
use crate::source::Source;
use crate::source::parser::parse_payload;

pub(crate) struct FileSource {
    input: String,
}

impl FileSource {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    fn is_stdin(&self) -> bool {
        self.input == "-"
    }

    pub(crate) fn find_files(&self) -> Result<Vec<PathBuf>, AppError> {
        let path = Path::new(&self.input);
        if path.is_file() {
            return Ok(vec![path.to_path_buf()]);
        }

        let pattern = if path.is_dir() {
            format!("{}/*.json", path.display())
        } else {
            self.input.clone()
        };

        let entries = glob::glob(&pattern).map_err(|e| AppError::Pattern {
            input: self.input.clone(),
            message: e.to_string(),
        })?;
        let mut files: Vec<PathBuf> = entries.flatten().filter(|p| p.is_file()).collect();
        files.sort();

        if files.is_empty() {
            return Err(AppError::Pattern {
                input: self.input.clone(),
                message: "no files matched".to_string(),
            });
        }
        Ok(files)
    }
}

fn parse_file(path: &Path) -> Result<Vec<Report>, AppError> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reports = parse_payload(&content).map_err(|source| AppError::Parse {
        origin: path.display().to_string(),
        source,
    })?;
    debug!("{}: {} reports", path.display(), reports.len());
    Ok(reports)
}

impl Source for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn describe(&self) -> String {
        if self.is_stdin() {
            "<stdin>".to_string()
        } else {
            self.input.clone()
        }
    }

    fn load(&self) -> Result<Vec<Report>, AppError> {
        if self.is_stdin() {
            let content = std::io::read_to_string(std::io::stdin()).map_err(|source| {
                AppError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                }
            })?;
            return parse_payload(&content).map_err(|source| AppError::Parse {
                origin: "<stdin>".to_string(),
                source,
            });
        }

        let files = self.find_files()?;
        debug!("Reading {} report files", files.len());
        let per_file = files
            .par_iter()
            .map(|path| parse_file(path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(per_file.into_iter().flatten().collect())
    }
}
