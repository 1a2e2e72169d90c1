//! JSON persistence: `<root>/<class>/<build id>.json` plus `<root>/<class>/index.json`

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use d4builds::{BuildRecord, BuildSink, ClassIndex};
use serde::Serialize;

pub const INDEX_FILE: &str = "index.json";

pub struct JsonStore {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    pub fn class_dir(&self, class_name: &str) -> PathBuf {
        self.root.join(class_name)
    }

    /// Files written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write_json<T: Serialize>(&mut self, path: &Path, value: &T) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::info!("Wrote: {}", path.display());
        self.written.push(path.to_path_buf());
        Ok(())
    }
}

impl BuildSink for JsonStore {
    fn write_build(&mut self, class_name: &str, build: &BuildRecord) -> d4builds::Result<()> {
        let path = self.class_dir(class_name).join(build.file_name());
        self.write_json(&path, build)?;
        Ok(())
    }

    fn write_index(&mut self, index: &ClassIndex) -> d4builds::Result<()> {
        let path = self.class_dir(&index.class_name).join(INDEX_FILE);
        self.write_json(&path, index)?;
        Ok(())
    }
}
