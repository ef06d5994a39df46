//! Loading `(id, text, links)` records from disk into a [`Corpus`].
//!
//! Accepted inputs: a `.jsonl` file with one record per line, a `.json` file holding one record
//! or an array of them, or a directory searched recursively for both.

use crate::{Corpus, Document};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn load_corpus<P: AsRef<Path>>(input: P) -> Result<Corpus> {
    let input = input.as_ref();
    let mut corpus = Corpus::new();
    for file in corpus_files(input)? {
        let before = corpus.len();
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            load_jsonl(&file, &mut corpus)?;
        } else {
            load_json(&file, &mut corpus)?;
        }
        tracing::debug!(file = %file.display(), added = corpus.len() - before, "loaded corpus file");
    }
    tracing::info!(input = %input.display(), documents = corpus.len(), "corpus loaded");
    Ok(corpus)
}

fn corpus_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walking {}", input.display()))?;
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        anyhow::bail!("corpus input {} does not exist", input.display());
    }
    Ok(files)
}

fn load_jsonl(file: &Path, corpus: &mut Corpus) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    for (lineno, line) in BufReader::new(f).lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", file.display()))?;
        if line.trim().is_empty() { continue; }
        let doc: Document = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid document record", file.display(), lineno + 1))?;
        corpus.insert(doc);
    }
    Ok(())
}

fn load_json(file: &Path, corpus: &mut Corpus) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: Document = serde_json::from_value(v)
                    .with_context(|| format!("{}: invalid document record", file.display()))?;
                corpus.insert(doc);
            }
        }
        other => {
            let doc: Document = serde_json::from_value(other)
                .with_context(|| format!("{}: invalid document record", file.display()))?;
            corpus.insert(doc);
        }
    }
    Ok(())
}
