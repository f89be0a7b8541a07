//! Fetches `.msg`/`.srv` definitions for packages not already on disk.
//!
//! A process resolving `geometry_msgs/msg/Twist` at runtime usually has no
//! local ROS2 install to read from. This module maps a package name to the
//! git repository that carries its interface definitions, clones (or
//! updates) that repository into a local cache, and hands back the path to
//! the requested file. A caller that already has the definition text (e.g.
//! bundled with an application) never needs this — it is only consulted on
//! a cache miss.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV_VAR: &str = "ZENOH_ROS2_SDK_CACHE";

/// Where a package's interface repository lives and how its packages are
/// laid out inside it.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    /// Git clone URL.
    pub url: String,
    /// Commit or tag to check out. `None` tracks the default branch tip.
    pub commit: Option<String>,
    /// Path prefix before `<package>/msg/<Name>.msg` inside the repo.
    /// Empty when packages sit at the repo root (e.g. `common_interfaces`).
    pub msg_path: String,
}

impl MessageRepository {
    /// Describe a repository whose packages sit at its root.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            commit: None,
            msg_path: String::new(),
        }
    }

    /// Pin this repository to a specific commit or tag.
    #[must_use]
    pub fn at_commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = Some(commit.into());
        self
    }
}

/// The built-in package → repository map for the core ROS2 interface
/// packages. Applications resolving out-of-tree packages should register
/// additional entries with [`SchemaRepo::register_package`].
#[must_use]
pub fn default_repositories() -> HashMap<String, MessageRepository> {
    let common = MessageRepository::new("https://github.com/ros2/common_interfaces.git");
    let rcl = MessageRepository::new("https://github.com/ros2/rcl_interfaces.git");
    let unique_identifier = MessageRepository::new("https://github.com/ros2/unique_identifier_msgs.git");

    let mut map = HashMap::new();
    for pkg in [
        "std_msgs",
        "geometry_msgs",
        "sensor_msgs",
        "nav_msgs",
        "actionlib_msgs",
        "diagnostic_msgs",
        "shape_msgs",
        "stereo_msgs",
        "trajectory_msgs",
        "visualization_msgs",
    ] {
        map.insert(pkg.to_string(), common.clone());
    }
    for pkg in [
        "builtin_interfaces",
        "rosgraph_msgs",
        "rcl_interfaces",
        "type_description_interfaces",
        "service_msgs",
    ] {
        map.insert(pkg.to_string(), rcl.clone());
    }
    map.insert("unique_identifier_msgs".to_string(), unique_identifier);
    map
}

/// Clones or updates git repositories on disk.
///
/// Exists so tests (and embedders with their own fetch policy) can swap in
/// a fake without shelling out to `git`.
pub trait GitFetcher: Send + Sync {
    /// Ensure `target_dir` holds a checkout of `url` at `commit` (or the
    /// default branch tip if `commit` is `None`).
    fn sync(&self, url: &str, target_dir: &Path, commit: Option<&str>) -> std::io::Result<()>;
}

/// Shells out to the system `git` binary.
#[derive(Debug, Default)]
pub struct SystemGitFetcher;

impl GitFetcher for SystemGitFetcher {
    fn sync(&self, url: &str, target_dir: &Path, commit: Option<&str>) -> std::io::Result<()> {
        if target_dir.join(".git").is_dir() {
            if let Some(commit) = commit {
                checkout(target_dir, commit)?;
            }
            return Ok(());
        }

        if target_dir.exists() {
            std::fs::remove_dir_all(target_dir)?;
        }
        if let Some(parent) = target_dir.parent() {
            std::fs::create_dir_all(parent)?;
        }

        run(Command::new("git").args([
            "clone",
            url,
            &target_dir.to_string_lossy(),
        ]))?;

        if let Some(commit) = commit {
            checkout(target_dir, commit)?;
        }
        Ok(())
    }
}

fn checkout(repo_dir: &Path, commit: &str) -> std::io::Result<()> {
    let direct = Command::new("git")
        .args(["-C", &repo_dir.to_string_lossy(), "checkout", commit])
        .output()?;
    if direct.status.success() {
        return Ok(());
    }
    run(Command::new("git").args(["-C", &repo_dir.to_string_lossy(), "fetch", "origin"]))?;
    run(Command::new("git").args(["-C", &repo_dir.to_string_lossy(), "checkout", commit]))
}

fn run(command: &mut Command) -> std::io::Result<()> {
    let output = command.output()?;
    if output.status.success() {
        return Ok(());
    }
    Err(std::io::Error::other(format!(
        "{:?} failed: {}",
        command,
        String::from_utf8_lossy(&output.stderr)
    )))
}

/// Resolves `.msg`/`.srv` file paths on demand, fetching repositories into
/// a local cache as needed.
pub struct SchemaRepo {
    cache_dir: PathBuf,
    repositories: HashMap<String, MessageRepository>,
    fetcher: Box<dyn GitFetcher>,
}

impl SchemaRepo {
    /// A repo using the default cache directory, built-in package map, and
    /// the system `git` binary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fetcher(Box::new(SystemGitFetcher))
    }

    /// Like [`Self::new`] but with a caller-supplied [`GitFetcher`] — used
    /// in tests to avoid network access.
    #[must_use]
    pub fn with_fetcher(fetcher: Box<dyn GitFetcher>) -> Self {
        Self {
            cache_dir: default_cache_dir(),
            repositories: default_repositories(),
            fetcher,
        }
    }

    /// Register (or override) the repository a package is fetched from.
    pub fn register_package(&mut self, package: impl Into<String>, repository: MessageRepository) {
        self.repositories.insert(package.into(), repository);
    }

    /// Resolve the on-disk path to `<package>/msg/<Name>.msg` (or
    /// `.../srv/<Name>.srv`), fetching the owning repository if it isn't
    /// cached yet.
    ///
    /// Returns `None` on any failure — an unknown package, a clone error,
    /// a file that doesn't exist at the expected path — rather than
    /// erroring, since a caller that already has the definition text
    /// should be able to treat this purely as a best-effort lookup.
    #[must_use]
    pub fn interface_file_path(&self, fq_type_name: &str) -> Option<PathBuf> {
        let mut parts = fq_type_name.splitn(3, '/');
        let package = parts.next()?;
        let kind = parts.next()?;
        let name = parts.next()?;

        let repository = self.repositories.get(package)?;
        let repo_dir = self.cache_dir.join(repo_cache_path(repository));

        if let Err(e) = self.fetcher.sync(
            &repository.url,
            &repo_dir,
            repository.commit.as_deref(),
        ) {
            tracing::warn!(package, error = %e, "failed to fetch message repository");
            return None;
        }

        let extension = if kind == "srv" { "srv" } else { "msg" };
        let candidate = if repository.msg_path.is_empty() {
            repo_dir.join(package).join(kind).join(format!("{name}.{extension}"))
        } else {
            repo_dir
                .join(&repository.msg_path)
                .join(package)
                .join(kind)
                .join(format!("{name}.{extension}"))
        };

        candidate.exists().then_some(candidate)
    }

    /// Delete the entire local cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory exists and cannot be
    /// removed.
    pub fn clear_cache(&self) -> std::io::Result<()> {
        if self.cache_dir.exists() {
            std::fs::remove_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// The resolved cache directory (after env var and home expansion).
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

impl Default for SchemaRepo {
    fn default() -> Self {
        Self::new()
    }
}

fn repo_cache_path(repository: &MessageRepository) -> String {
    let name = repository
        .url
        .rsplit('/')
        .next()
        .unwrap_or(&repository.url)
        .trim_end_matches(".git");
    name.to_string()
}

fn default_cache_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CACHE_DIR_ENV_VAR) {
        return expand_home(&dir);
    }
    expand_home("~/.cache/zenoh_ros2_sdk")
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Ok(home) = std::env::var("HOME")
    {
        return PathBuf::from(home).join(rest);
    }
    PathBuf::from(path)
}
