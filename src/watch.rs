//! File system watcher for rebuild-on-change.
//!
//! Monitors the source directory and the config file. Every relevant change
//! triggers a full build: the pipeline is a single cheap pass, so there is
//! no incremental path. A config change reloads `weft.toml` first.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌─────────────────────────┐
//! │ notify   │───▶│ Debouncer │───▶│    handle_changes()     │
//! │ events   │    │ (300ms)   │    │  config? reload config  │
//! └──────────┘    └───────────┘    │  then build_site()      │
//!                                  └─────────────────────────┘
//! ```

use crate::{
    build::build_site,
    cli::Cli,
    config::SiteConfig,
    log,
    logger::WatchStatus,
    utils::category::{FileCategory, categorize_path},
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{RecvTimeoutError, channel},
    time::{Duration, Instant},
};

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
///
/// Events arriving during the cooldown are queued, not dropped, and are
/// delivered once it ends.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
    debounce: Duration,
    cooldown: Duration,
}

impl Debouncer {
    fn new(debounce: Duration, cooldown: Duration) -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
            debounce,
            cooldown,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild.is_some_and(|t| t.elapsed() < self.cooldown)
    }

    fn add(&mut self, event: Event) {
        self.pending.extend(event.paths);
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self.last_event.is_some_and(|t| t.elapsed() >= self.debounce)
            && !self.in_cooldown()
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        let mut paths: Vec<_> = self.pending.drain().collect();
        paths.sort();
        paths
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            return Duration::from_secs(60);
        }
        let cooldown_left = self
            .last_rebuild
            .map_or(Duration::ZERO, |t| self.cooldown.saturating_sub(t.elapsed()));
        self.debounce.max(cooldown_left)
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// What a batch of changed paths asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Nothing,
    Rebuild,
    ReloadAndRebuild,
}

fn plan(paths: &[PathBuf], config: &SiteConfig) -> Action {
    let categories: Vec<_> = paths.iter().map(|p| categorize_path(p, config)).collect();

    if categories.contains(&FileCategory::Config) {
        Action::ReloadAndRebuild
    } else if categories.iter().any(|c| c.triggers_rebuild()) {
        Action::Rebuild
    } else {
        Action::Nothing
    }
}

/// Reload `weft.toml`, keeping CLI overrides.
fn reload_config(cli: &Cli, config_path: &Path) -> Result<SiteConfig> {
    let mut config = SiteConfig::from_path(config_path)?;
    config.update_with_cli(cli);
    config.validate()?;
    Ok(config)
}

/// Process file changes. Returns true if a build ran (for cooldown).
fn handle_changes(
    paths: &[PathBuf],
    config: &mut SiteConfig,
    cli: &Cli,
    status: &mut WatchStatus,
) -> bool {
    let action = plan(paths, config);
    if action == Action::Nothing {
        return false;
    }

    if action == Action::ReloadAndRebuild {
        match reload_config(cli, &config.config_path) {
            Ok(fresh) => *config = fresh,
            Err(e) => {
                status.error("config reload failed", &format!("{e:#}"));
                return false;
            }
        }
    }

    let trigger = rel_list(paths, config.get_root());
    match build_site(config) {
        Ok(report) => status.success(&format!(
            "rebuilt {} pages ({trigger})",
            report.pages
        )),
        Err(e) => status.error(&format!("build failed ({trigger})"), &format!("{e:#}")),
    }
    true
}

/// `a/b.html, weft.toml`
fn rel_list(paths: &[PathBuf], root: &Path) -> String {
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap_or(p).display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn setup_watchers(
    watcher: &mut impl Watcher,
    watched_source: &mut Option<PathBuf>,
    config: &SiteConfig,
) -> Result<()> {
    watcher
        .watch(&config.config_path, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", config.config_path.display()))?;
    watch_source(watcher, watched_source, &config.build.source)?;

    log!(
        "watch";
        "watching {}",
        rel_list(
            &[config.build.source.clone(), config.config_path.clone()],
            config.get_root()
        )
    );
    Ok(())
}

/// Point the recursive source watch at `source`.
///
/// Called again after every handled change so a reloaded `build.source`, or
/// a source directory created after startup, gets picked up.
fn watch_source(
    watcher: &mut impl Watcher,
    watched: &mut Option<PathBuf>,
    source: &Path,
) -> Result<()> {
    if watched.as_deref() == Some(source) {
        return Ok(());
    }
    if let Some(old) = watched.take() {
        // the old directory may be gone already
        watcher.unwatch(&old).ok();
    }
    if !source.is_dir() {
        log!("warn"; "source directory {} not found, only the config is watched", source.display());
        return Ok(());
    }

    watcher
        .watch(source, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", source.display()))?;
    *watched = Some(source.to_path_buf());
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
///
/// Runs until the event channel closes. Build errors are reported and
/// the loop keeps going.
pub fn watch_for_changes_blocking(mut config: SiteConfig, cli: &Cli) -> Result<()> {
    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    let mut watched_source = None;
    setup_watchers(&mut watcher, &mut watched_source, &config)?;

    let mut debouncer = Debouncer::new(config.watch.debounce(), config.watch.cooldown());
    let mut status = WatchStatus::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) => debouncer.add(event),
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), &mut config, cli, &mut status) {
                    debouncer.mark_rebuild();
                }
                if let Err(e) = watch_source(&mut watcher, &mut watched_source, &config.build.source) {
                    log!("watch"; "{e:#}");
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            // irrelevant events, timeout without pending changes
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn config(root: &Path) -> SiteConfig {
        let root = root.canonicalize().unwrap();
        let mut config = SiteConfig::default();
        config.set_root(&root);
        config.config_path = root.join("weft.toml");
        config.build.source = root.join("src");
        config.build.output = root.join("dist");
        config
    }

    fn event(paths: &[&Path]) -> Event {
        let mut event = Event::new(EventKind::Create(notify::event::CreateKind::File));
        for path in paths {
            event = event.add_path(path.to_path_buf());
        }
        event
    }

    #[test]
    fn test_debouncer_batches_and_dedups() {
        let mut debouncer = Debouncer::new(Duration::ZERO, Duration::from_secs(60));
        assert!(!debouncer.ready());

        debouncer.add(event(&[Path::new("/s/b.html"), Path::new("/s/a.html")]));
        debouncer.add(event(&[Path::new("/s/a.html")]));
        assert!(debouncer.ready());

        let taken = debouncer.take();
        assert_eq!(taken, vec![PathBuf::from("/s/a.html"), PathBuf::from("/s/b.html")]);
        assert!(!debouncer.ready());
    }

    #[test]
    fn test_debouncer_waits_for_quiet_period() {
        let mut debouncer = Debouncer::new(Duration::from_secs(60), Duration::ZERO);
        debouncer.add(event(&[Path::new("/s/a.html")]));
        assert!(!debouncer.ready());
        assert_eq!(debouncer.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_debouncer_cooldown() {
        let mut debouncer = Debouncer::new(Duration::ZERO, Duration::from_secs(60));
        assert!(!debouncer.in_cooldown());
        debouncer.mark_rebuild();
        assert!(debouncer.in_cooldown());
    }

    #[test]
    fn test_debouncer_queues_events_during_cooldown() {
        let mut debouncer = Debouncer::new(Duration::ZERO, Duration::from_secs(60));
        debouncer.mark_rebuild();
        debouncer.add(event(&[Path::new("/s/a.html")]));

        assert!(!debouncer.ready());
        assert!(debouncer.timeout() > Duration::ZERO);
        assert!(debouncer.timeout() <= Duration::from_secs(60));
        assert_eq!(debouncer.take(), vec![PathBuf::from("/s/a.html")]);
    }

    #[test]
    fn test_debouncer_delivers_after_cooldown() {
        let mut debouncer = Debouncer::new(Duration::ZERO, Duration::ZERO);
        debouncer.mark_rebuild();
        debouncer.add(event(&[Path::new("/s/a.html")]));

        assert!(debouncer.ready());
        assert_eq!(debouncer.timeout(), Duration::ZERO);
    }

    #[test]
    fn test_watch_source_follows_config() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("src");
        let second = dir.path().join("pages");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();

        let mut watcher = notify::recommended_watcher(|_: notify::Result<Event>| {}).unwrap();
        let mut watched = None;

        watch_source(&mut watcher, &mut watched, &dir.path().join("missing")).unwrap();
        assert_eq!(watched, None);

        watch_source(&mut watcher, &mut watched, &first).unwrap();
        assert_eq!(watched.as_deref(), Some(first.as_path()));

        watch_source(&mut watcher, &mut watched, &second).unwrap();
        assert_eq!(watched.as_deref(), Some(second.as_path()));
    }

    #[test]
    fn test_plan() {
        let dir = tempdir().unwrap();
        let config = config(dir.path());
        let root = config.get_root().to_path_buf();

        assert_eq!(plan(&[root.join("dist/index.html")], &config), Action::Nothing);
        assert_eq!(plan(&[root.join("src/index.html")], &config), Action::Rebuild);
        assert_eq!(plan(&[root.join("src/font/a.woff")], &config), Action::Rebuild);
        assert_eq!(
            plan(&[root.join("src/index.html"), root.join("weft.toml")], &config),
            Action::ReloadAndRebuild
        );
    }

    #[test]
    fn test_handle_changes_rebuilds() {
        let dir = tempdir().unwrap();
        let mut config = config(dir.path());
        let src = config.build.source.clone();
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("index.html"), "<b>@@_title</b>").unwrap();

        let cli = Cli::try_parse_from(["weft", "watch"]).unwrap();
        let mut status = WatchStatus::new();
        let ran = handle_changes(&[src.join("index.html")], &mut config, &cli, &mut status);

        assert!(ran);
        let page = fs::read_to_string(config.build.output.join("index.html")).unwrap();
        assert_eq!(page, "<b>My Site</b>");
    }

    #[test]
    fn test_handle_changes_bad_config_keeps_old() {
        let dir = tempdir().unwrap();
        let mut config = config(dir.path());
        fs::write(&config.config_path, "[site\n").unwrap();

        let cli = Cli::try_parse_from(["weft", "watch"]).unwrap();
        let mut status = WatchStatus::new();
        let path = config.config_path.clone();
        let ran = handle_changes(&[path], &mut config, &cli, &mut status);

        assert!(!ran);
        assert_eq!(config.site.title, "My Site");
    }

    #[test]
    fn test_rel_list() {
        let root = Path::new("/site");
        let paths = [PathBuf::from("/site/src/a.html"), PathBuf::from("/site/weft.toml")];
        assert_eq!(rel_list(&paths, root), "src/a.html, weft.toml");
    }
}
