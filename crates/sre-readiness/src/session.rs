use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use readiness_spec::{AnswerStore, SurveySchema, SurveyState, share_url};
use tracing::debug;

use crate::config::Settings;
use crate::secure::{FileSideChannel, link_path};

/// The answer store of one origin plus the file holding its current link.
pub struct Session {
    store: AnswerStore<FileSideChannel>,
    link_file: PathBuf,
}

impl Session {
    /// Opens the origin's session, starting from `link` when given and from
    /// the persisted link otherwise.
    pub fn open(settings: &Settings, link: Option<&str>) -> Result<Self> {
        let link_file = link_path(&settings.state_dir, &settings.origin);
        let query = match link {
            Some(link) => link.to_string(),
            None => read_link(&link_file)?,
        };
        debug!(origin = %settings.origin, link_file = %link_file.display(), "opening session");
        let side = FileSideChannel::for_origin(&settings.state_dir, &settings.origin);
        Ok(Self {
            store: AnswerStore::new(settings.schema.clone(), &query, side),
            link_file,
        })
    }

    pub fn store(&self) -> &AnswerStore<FileSideChannel> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut AnswerStore<FileSideChannel> {
        &mut self.store
    }

    pub fn schema(&self) -> &SurveySchema {
        self.store.schema()
    }

    pub fn state(&self) -> SurveyState {
        self.store.get_state()
    }

    /// The link to hand out: a full URL when a base URL is configured.
    pub fn shareable(&self, settings: &Settings) -> String {
        match &settings.base_url {
            Some(base) => share_url(base, &self.state()).to_string(),
            None => self.store.link().to_string(),
        }
    }

    /// Writes the current link back to disk.
    pub fn persist(&self) -> Result<()> {
        let link = self.store.link();
        if link.is_empty() {
            return match fs::remove_file(&self.link_file) {
                Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err)
                    .with_context(|| format!("failed to remove {}", self.link_file.display())),
                _ => Ok(()),
            };
        }
        if let Some(parent) = self.link_file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&self.link_file, link)
            .with_context(|| format!("failed to write {}", self.link_file.display()))
    }
}

fn read_link(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(raw.trim().to_string()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}
