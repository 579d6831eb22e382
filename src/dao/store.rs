//! File-backed resource store.
//!
//! Keeps a JSON snapshot of workload controllers on disk and serves it
//! through the [`Accessor`] traits. Deployments are pausable; daemon sets
//! are listed only. Every mutation reloads the file, applies the change and
//! writes it back atomically (temp file, then rename).

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{split_path, Accessor, AccessorFactory, CallContext, Gvr, Pausable, Row, Table};
use crate::error::BrowseError;

/// File name of the snapshot inside the data directory.
pub const STORE_FILE: &str = "resources.json";

/// A single workload controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Plural resource noun, e.g. `deployments`.
    pub kind: String,
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub replicas: u32,
    #[serde(default)]
    pub ready: u32,
    #[serde(default)]
    pub paused: bool,
    pub created_at: DateTime<Utc>,
}

impl ResourceEntry {
    pub fn path(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    /// Artificial per-call latency, used to exercise call timeouts.
    #[serde(default)]
    latency_ms: u64,
    #[serde(default)]
    resources: Vec<ResourceEntry>,
}

/// In-memory view of the snapshot file.
pub struct FileStore {
    path: PathBuf,
    data: StoreFile,
}

impl FileStore {
    /// Load the snapshot at `path`. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, BrowseError> {
        let data = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)
                .map_err(|e| BrowseError::Store(format!("Invalid {}: {}", path.display(), e)))?
        } else {
            StoreFile::default()
        };
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Atomically save the snapshot.
    pub fn save(&self) -> Result<(), BrowseError> {
        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Write a small demo snapshot if nothing exists at `path` yet.
    pub fn seed_demo(path: &Path) -> Result<(), BrowseError> {
        if path.exists() {
            return Ok(());
        }
        let now = Utc::now();
        let entry = |kind: &str, ns: &str, name: &str, replicas: u32, paused: bool, age_h: i64| {
            ResourceEntry {
                kind: kind.into(),
                namespace: ns.into(),
                name: name.into(),
                replicas,
                ready: replicas,
                paused,
                created_at: now - chrono::Duration::hours(age_h),
            }
        };
        let mut store = FileStore::load(path)?;
        store.data.resources = vec![
            entry("deployments", "default", "web", 3, false, 72),
            entry("deployments", "default", "api", 2, false, 30),
            entry("deployments", "default", "worker", 1, true, 5),
            entry("deployments", "kube-system", "coredns", 2, false, 400),
            entry("daemonsets", "kube-system", "kube-proxy", 3, false, 400),
            entry("daemonsets", "monitoring", "node-exporter", 3, false, 120),
        ];
        store.save()?;
        tracing::info!(path = %path.display(), "Seeded demo resource store");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.data.latency_ms)
    }

    pub fn set_latency(&mut self, latency: Duration) {
        self.data.latency_ms = latency.as_millis() as u64;
    }

    pub fn insert(&mut self, entry: ResourceEntry) {
        self.data.resources.push(entry);
    }

    /// Entries of one kind, in file order.
    pub fn entries<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ResourceEntry> + 'a {
        self.data.resources.iter().filter(move |r| r.kind == kind)
    }

    pub fn get<'a>(&'a self, kind: &'a str, path: &str) -> Option<&'a ResourceEntry> {
        self.entries(kind).find(|r| r.path() == path)
    }

    /// Set the paused flag of one resource.
    pub fn set_paused(&mut self, gvr: &Gvr, path: &str, paused: bool) -> Result<(), BrowseError> {
        let (ns, name) = split_path(path)?;
        let entry = self
            .data
            .resources
            .iter_mut()
            .find(|r| r.kind == gvr.resource() && r.namespace == ns && r.name == name)
            .ok_or_else(|| BrowseError::NotFound {
                gvr: gvr.resource().to_string(),
                path: path.to_string(),
            })?;
        entry.paused = paused;
        Ok(())
    }
}

/// Render an age like `3d`, `5h`, `12m` or `40s`.
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - created_at).num_seconds().max(0);
    if secs >= 86_400 {
        format!("{}d", secs / 86_400)
    } else if secs >= 3_600 {
        format!("{}h", secs / 3_600)
    } else if secs >= 60 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

/// Load the store after waiting out its configured latency.
fn load_for_call(ctx: &CallContext, path: &Path) -> Result<FileStore, BrowseError> {
    ctx.check()?;
    let store = FileStore::load(path)?;
    let latency = store.latency();
    if !latency.is_zero() {
        ctx.wait(latency)?;
    }
    Ok(store)
}

fn list_rows<F>(
    ctx: &CallContext,
    path: &Path,
    gvr: &Gvr,
    namespace: Option<&str>,
    header: &[&str],
    cells: F,
) -> Result<Table, BrowseError>
where
    F: Fn(&ResourceEntry, DateTime<Utc>) -> Vec<String>,
{
    let store = load_for_call(ctx, path)?;
    let now = Utc::now();
    let rows = store
        .entries(gvr.resource())
        .filter(|r| namespace.map_or(true, |ns| r.namespace == ns))
        .map(|r| Row {
            path: r.path(),
            cells: cells(r, now),
        })
        .collect();
    Ok(Table {
        header: header.iter().map(|h| h.to_string()).collect(),
        rows,
    })
}

/// Pausable accessor for deployments.
pub struct DeploymentAccessor {
    gvr: Gvr,
    store_path: PathBuf,
}

impl DeploymentAccessor {
    pub fn new(store_path: PathBuf) -> Self {
        Self {
            gvr: Gvr::deployments(),
            store_path,
        }
    }

    fn set_paused(&self, ctx: &CallContext, path: &str, paused: bool) -> Result<(), BrowseError> {
        let mut store = load_for_call(ctx, &self.store_path)?;
        // The deadline may have passed while waiting on the store.
        ctx.check()?;
        store.set_paused(&self.gvr, path, paused)?;
        store.save()?;
        tracing::debug!(path, paused, "Updated deployment rollout state");
        Ok(())
    }
}

impl Accessor for DeploymentAccessor {
    fn gvr(&self) -> &Gvr {
        &self.gvr
    }

    fn list(&self, ctx: &CallContext, namespace: Option<&str>) -> Result<Table, BrowseError> {
        list_rows(
            ctx,
            &self.store_path,
            &self.gvr,
            namespace,
            &["NAMESPACE", "NAME", "READY", "PAUSED", "AGE"],
            |r, now| {
                vec![
                    r.namespace.clone(),
                    r.name.clone(),
                    format!("{}/{}", r.ready, r.replicas),
                    r.paused.to_string(),
                    format_age(r.created_at, now),
                ]
            },
        )
    }

    fn as_pausable(&self) -> Option<&dyn Pausable> {
        Some(self)
    }
}

impl Pausable for DeploymentAccessor {
    fn pause(&self, ctx: &CallContext, path: &str) -> Result<(), BrowseError> {
        self.set_paused(ctx, path, true)
    }

    fn resume(&self, ctx: &CallContext, path: &str) -> Result<(), BrowseError> {
        self.set_paused(ctx, path, false)
    }
}

/// Read-only accessor for daemon sets, which have no rollout pause.
pub struct DaemonSetAccessor {
    gvr: Gvr,
    store_path: PathBuf,
}

impl DaemonSetAccessor {
    pub fn new(store_path: PathBuf) -> Self {
        Self {
            gvr: Gvr::daemonsets(),
            store_path,
        }
    }
}

impl Accessor for DaemonSetAccessor {
    fn gvr(&self) -> &Gvr {
        &self.gvr
    }

    fn list(&self, ctx: &CallContext, namespace: Option<&str>) -> Result<Table, BrowseError> {
        list_rows(
            ctx,
            &self.store_path,
            &self.gvr,
            namespace,
            &["NAMESPACE", "NAME", "DESIRED", "READY", "AGE"],
            |r, now| {
                vec![
                    r.namespace.clone(),
                    r.name.clone(),
                    r.replicas.to_string(),
                    r.ready.to_string(),
                    format_age(r.created_at, now),
                ]
            },
        )
    }
}

/// Accessor factory over one snapshot file.
#[derive(Debug, Clone)]
pub struct StoreFactory {
    path: PathBuf,
}

impl StoreFactory {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AccessorFactory for StoreFactory {
    fn accessor_for(&self, gvr: &Gvr) -> Result<Box<dyn Accessor>, BrowseError> {
        if *gvr == Gvr::deployments() {
            Ok(Box::new(DeploymentAccessor::new(self.path.clone())))
        } else if *gvr == Gvr::daemonsets() {
            Ok(Box::new(DaemonSetAccessor::new(self.path.clone())))
        } else {
            Err(BrowseError::NoAccessor {
                gvr: gvr.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded(dir: &TempDir) -> PathBuf {
        let path = dir.path().join(STORE_FILE);
        FileStore::seed_demo(&path).unwrap();
        path
    }

    #[test]
    fn missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::load(&dir.path().join(STORE_FILE)).unwrap();
        assert_eq!(store.entries("deployments").count(), 0);
    }

    #[test]
    fn corrupted_store_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(FileStore::load(&path), Err(BrowseError::Store(_))));
    }

    #[test]
    fn seed_does_not_overwrite_existing_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE);
        std::fs::write(&path, r#"{"resources": []}"#).unwrap();
        FileStore::seed_demo(&path).unwrap();
        let store = FileStore::load(&path).unwrap();
        assert_eq!(store.entries("deployments").count(), 0);
    }

    #[test]
    fn deployments_list_with_paused_column() {
        let dir = TempDir::new().unwrap();
        let acc = DeploymentAccessor::new(seeded(&dir));
        let ctx = CallContext::background();

        let table = acc.list(&ctx, None).unwrap();
        let paused = table.header_index("PAUSED").unwrap();
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0].path, "default/web");
        assert_eq!(table.rows[0].cells[paused], "false");
        assert_eq!(table.rows[2].cells[paused], "true");

        let scoped = acc.list(&ctx, Some("kube-system")).unwrap();
        assert_eq!(scoped.rows.len(), 1);
        assert_eq!(scoped.rows[0].path, "kube-system/coredns");
    }

    #[test]
    fn pause_and_resume_persist() {
        let dir = TempDir::new().unwrap();
        let path = seeded(&dir);
        let acc = DeploymentAccessor::new(path.clone());
        let ctx = CallContext::with_timeout(Duration::from_secs(5));

        acc.pause(&ctx, "default/web").unwrap();
        let store = FileStore::load(&path).unwrap();
        assert!(store.get("deployments", "default/web").unwrap().paused);

        acc.resume(&ctx, "default/web").unwrap();
        let store = FileStore::load(&path).unwrap();
        assert!(!store.get("deployments", "default/web").unwrap().paused);
    }

    #[test]
    fn pause_unknown_deployment_is_not_found() {
        let dir = TempDir::new().unwrap();
        let acc = DeploymentAccessor::new(seeded(&dir));
        let ctx = CallContext::background();
        let err = acc.pause(&ctx, "default/nope").unwrap_err();
        assert_eq!(err.to_string(), "deployments \"default/nope\" not found");
    }

    #[test]
    fn pause_with_expired_context_times_out() {
        let dir = TempDir::new().unwrap();
        let path = seeded(&dir);
        let acc = DeploymentAccessor::new(path.clone());
        let ctx = CallContext::with_timeout(Duration::ZERO);

        assert!(matches!(acc.pause(&ctx, "default/web"), Err(BrowseError::Timeout)));
        let store = FileStore::load(&path).unwrap();
        assert!(!store.get("deployments", "default/web").unwrap().paused);
    }

    #[test]
    fn latency_beyond_deadline_times_out() {
        let dir = TempDir::new().unwrap();
        let path = seeded(&dir);
        let mut store = FileStore::load(&path).unwrap();
        store.set_latency(Duration::from_millis(300));
        store.save().unwrap();

        let acc = DeploymentAccessor::new(path);
        let ctx = CallContext::with_timeout(Duration::from_millis(30));
        assert!(matches!(acc.pause(&ctx, "default/web"), Err(BrowseError::Timeout)));
    }

    #[test]
    fn daemonsets_are_not_pausable() {
        let dir = TempDir::new().unwrap();
        let factory = StoreFactory::new(seeded(&dir));
        let acc = factory.accessor_for(&Gvr::daemonsets()).unwrap();
        assert!(acc.as_pausable().is_none());

        let table = acc.list(&CallContext::background(), None).unwrap();
        assert_eq!(table.header_index("PAUSED"), None);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn factory_rejects_unknown_kind() {
        let dir = TempDir::new().unwrap();
        let factory = StoreFactory::new(seeded(&dir));
        let gvr = Gvr::new("", "v1", "pods");
        match factory.accessor_for(&gvr) {
            Err(BrowseError::NoAccessor { gvr }) => assert_eq!(gvr, "v1/pods"),
            Err(other) => panic!("Expected NoAccessor, got: {:?}", other),
            Ok(_) => panic!("Expected NoAccessor, got an accessor"),
        }
    }

    #[test]
    fn format_age_units() {
        let now = Utc::now();
        assert_eq!(format_age(now - chrono::Duration::seconds(40), now), "40s");
        assert_eq!(format_age(now - chrono::Duration::minutes(12), now), "12m");
        assert_eq!(format_age(now - chrono::Duration::hours(5), now), "5h");
        assert_eq!(format_age(now - chrono::Duration::days(3), now), "3d");
        assert_eq!(format_age(now + chrono::Duration::seconds(10), now), "0s");
    }
}
