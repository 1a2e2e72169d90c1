//! Sync orchestration
//!
//! Runs guide pages through planner lookup and transformation one at a time.
//! Each build is its own failure boundary: an error is logged with the
//! offending URL and the run moves on to the next guide.

use std::time::Duration;

use crate::build::{transform_build, BuildContext, BuildRecord, ClassIndex, Layout};
use crate::error::{Result, SyncError};
use crate::guide::find_planner_ref;
use crate::mapping::MappingTable;
use crate::planner::PlannerPayload;
use crate::resolve::Resolver;

/// Retrieves remote content. Implementations own retry and backoff.
pub trait Fetch {
    fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Receives finished builds and class indexes
pub trait BuildSink {
    fn write_build(&mut self, class_name: &str, build: &BuildRecord) -> Result<()>;

    fn write_index(&mut self, index: &ClassIndex) -> Result<()>;
}

/// A guide to sync and the tier it is listed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideEntry {
    pub url: String,
    pub tier: String,
}

impl GuideEntry {
    pub fn new(url: &str, tier: &str) -> Self {
        Self {
            url: url.to_string(),
            tier: tier.to_string(),
        }
    }
}

/// Fetch and parse the mapping table
pub fn fetch_mapping<F: Fetch + ?Sized>(fetcher: &F, url: &str) -> Result<MappingTable> {
    tracing::info!("Fetching mapping data...");
    let text = fetcher.fetch_text(url)?;
    let mapping = MappingTable::from_json(&text)?;
    let stats = mapping.stats();
    tracing::info!(
        "Mapping data: {} affixes, {} items, {} legendary powers",
        stats.affixes,
        stats.items,
        stats.legendary_powers
    );
    Ok(mapping)
}

/// Planner API URL for a planner ID
pub fn planner_url(template: &str, planner_id: &str) -> String {
    template.replace("{planner_id}", planner_id)
}

/// Outcome of syncing one class
#[derive(Debug, Default)]
pub struct ClassReport {
    pub class_name: String,
    pub builds: Vec<BuildRecord>,
    pub failures: Vec<(String, SyncError)>,
}

impl ClassReport {
    /// Index for the builds produced, or `None` when nothing succeeded
    pub fn index(&self) -> Option<ClassIndex> {
        if self.builds.is_empty() {
            return None;
        }
        Some(ClassIndex::from_builds(&self.class_name, &self.builds))
    }
}

/// Per-run sync settings
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// `{planner_id}` is substituted
    pub planner_api: String,
    pub category: String,
    pub layout: Layout,
    /// Pause between consecutive builds
    pub delay: Duration,
}

pub struct Syncer<'a, F: Fetch + ?Sized> {
    fetcher: &'a F,
    resolver: Resolver<'a>,
    options: SyncOptions,
}

impl<'a, F: Fetch + ?Sized> Syncer<'a, F> {
    pub fn new(fetcher: &'a F, resolver: Resolver<'a>, options: SyncOptions) -> Self {
        Self {
            fetcher,
            resolver,
            options,
        }
    }

    /// Fetch a guide page, its planner payload, and transform it
    pub fn sync_build(&self, guide: &GuideEntry) -> Result<BuildRecord> {
        tracing::info!("Fetching guide page: {}", guide.url);
        let html = self.fetcher.fetch_text(&guide.url)?;
        let planner = find_planner_ref(&html, &guide.url)?;

        tracing::info!("Fetching planner data: {}", planner.planner_id);
        let url = planner_url(&self.options.planner_api, &planner.planner_id);
        let payload = PlannerPayload::from_json(&self.fetcher.fetch_text(&url)?)?;

        let layout = match &self.options.layout {
            Layout::Flat { profile_index: None } => Layout::Flat {
                profile_index: planner.profile_id.clone(),
            },
            other => other.clone(),
        };
        let context = BuildContext::new(&guide.url, &guide.tier, &self.options.category);

        Ok(transform_build(&payload, &context, &layout, &self.resolver))
    }

    /// Sync every guide of a class, writing each build as it completes and
    /// the class index at the end
    pub fn sync_class(
        &self,
        class_name: &str,
        guides: &[GuideEntry],
        sink: &mut dyn BuildSink,
    ) -> ClassReport {
        let mut report = ClassReport {
            class_name: class_name.to_string(),
            ..Default::default()
        };

        for (i, guide) in guides.iter().enumerate() {
            if i > 0 && !self.options.delay.is_zero() {
                std::thread::sleep(self.options.delay);
            }

            tracing::info!("Processing: {}", guide.url);
            let result = self
                .sync_build(guide)
                .and_then(|build| sink.write_build(class_name, &build).map(|_| build));

            match result {
                Ok(build) => {
                    tracing::info!("Synced {} ({})", build.id, build.tier);
                    report.builds.push(build);
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", guide.url, e);
                    report.failures.push((guide.url.clone(), e));
                }
            }
        }

        match report.index() {
            Some(index) => {
                if let Err(e) = sink.write_index(&index) {
                    tracing::warn!("Could not write index for {}: {}", class_name, e);
                }
            }
            None => tracing::warn!("No builds produced for {}; index not updated", class_name),
        }

        report
    }
}
