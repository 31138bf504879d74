//! File-backed profile store: one pretty-printed JSON file per profile name.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::StoreError;
use crate::models::Profile;
use crate::profiles::migration::migrate_legacy_education;
use crate::storage::{read_json, write_json_atomic};

/// Result of a save: the name actually used (possibly version-suffixed) and its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedProfile {
    pub profile_name: String,
    #[serde(skip)]
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
    backup_dirs: Vec<PathBuf>,
}

impl ProfileStore {
    /// Creates the profiles directory if needed. Backup dirs that do not exist are dropped.
    pub async fn open(dir: impl Into<PathBuf>, backup_dirs: Vec<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let mut existing = Vec::new();
        for backup in backup_dirs {
            if tokio::fs::try_exists(&backup).await.unwrap_or(false) {
                existing.push(backup);
            } else {
                warn!("Profile backup dir {} does not exist; skipping", backup.display());
            }
        }
        info!(
            "Profile store at {} ({} backup dir(s))",
            dir.display(),
            existing.len()
        );

        Ok(Self {
            dir,
            backup_dirs: existing,
        })
    }

    /// Saves `profile` under a cleaned version of `name`.
    ///
    /// When a profile with that name exists and `replace` is false, the first free
    /// `_v2`, `_v3`, … suffix is used instead. Existing files are never overwritten
    /// unless `replace` is set.
    pub async fn save(
        &self,
        name: &str,
        profile: &Profile,
        replace: bool,
    ) -> Result<SavedProfile, StoreError> {
        let base = clean_name(name)?;
        let mut profile_name = base.clone();
        let mut path = self.path_for(&profile_name);

        if !replace && exists(&path).await {
            let mut version = 2u32;
            loop {
                let candidate = format!("{base}_v{version}");
                let candidate_path = self.path_for(&candidate);
                if !exists(&candidate_path).await {
                    profile_name = candidate;
                    path = candidate_path;
                    break;
                }
                version += 1;
            }
        }

        write_json_atomic(&path, profile).await?;
        info!("Saved profile '{profile_name}' to {}", path.display());
        Ok(SavedProfile { profile_name, path })
    }

    /// Loads a profile by exact name, falling back to the backup dirs.
    /// Legacy education records are migrated on the way in.
    pub async fn load(&self, name: &str) -> Result<Profile, StoreError> {
        validate_name(name)?;
        let candidates =
            std::iter::once(&self.dir).chain(self.backup_dirs.iter()).map(|d| profile_file(d, name));

        for path in candidates {
            if let Some(mut data) = read_json::<Value>(&path).await? {
                migrate_legacy_education(&mut data);
                return Ok(serde_json::from_value(data)?);
            }
        }
        Err(StoreError::NotFound(format!("Profile '{name}'")))
    }

    /// Sorted profile names. Falls back to the first non-empty backup dir
    /// when no profile has been saved yet.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let names = list_names(&self.dir).await?;
        if !names.is_empty() {
            return Ok(names);
        }
        for backup in &self.backup_dirs {
            let backup_names = list_names(backup).await?;
            if !backup_names.is_empty() {
                info!(
                    "No saved profiles; listing {} from backup dir {}",
                    backup_names.len(),
                    backup.display()
                );
                return Ok(backup_names);
            }
        }
        Ok(Vec::new())
    }

    /// Returns whether a file was removed. Backup dirs are never touched.
    pub async fn delete(&self, name: &str) -> Result<bool, StoreError> {
        validate_name(name)?;
        match tokio::fs::remove_file(self.path_for(name)).await {
            Ok(()) => {
                info!("Deleted profile '{name}'");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        profile_file(&self.dir, name)
    }
}

/// Trims, collapses internal whitespace and strips dots.
pub fn clean_name(raw: &str) -> Result<String, StoreError> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let cleaned = collapsed.replace('.', "");
    validate_name(&cleaned)?;
    Ok(cleaned)
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::InvalidName(
            "profile name cannot be empty".to_string(),
        ));
    }
    if name.contains(['/', '\\']) || name == ".." {
        return Err(StoreError::InvalidName(format!(
            "profile name '{name}' may not contain path separators"
        )));
    }
    Ok(())
}

fn profile_file(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.json"))
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

async fn list_names(dir: &Path) -> Result<Vec<String>, StoreError> {
    let mut names = Vec::new();
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
        Err(e) => return Err(e.into()),
    };
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Education, Experience, PersonalInfo, Project};
    use tempfile::TempDir;

    fn sample_profile() -> Profile {
        Profile {
            personal_info: PersonalInfo {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                ..Default::default()
            },
            summary: "Analyst".to_string(),
            experience: vec![
                Experience {
                    title: "Engineer".to_string(),
                    company: "Analytical Engines".to_string(),
                    description: vec!["Wrote the first program".to_string(), "Second".to_string()],
                    ..Default::default()
                },
                Experience {
                    title: "Consultant".to_string(),
                    company: "Babbage & Co".to_string(),
                    ..Default::default()
                },
            ],
            projects: vec![Project {
                name: "Notes".to_string(),
                technologies: vec!["Punch cards".to_string()],
                ..Default::default()
            }],
            certifications: vec!["B".to_string(), "A".to_string()],
            ..Default::default()
        }
    }

    async fn store() -> (TempDir, ProfileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::open(dir.path().join("profiles"), vec![])
            .await
            .unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_save_then_load_is_structurally_equal() {
        let (_dir, store) = store().await;
        let profile = sample_profile();
        let saved = store.save("ada", &profile, false).await.unwrap();
        assert_eq!(saved.profile_name, "ada");

        let loaded = store.load("ada").await.unwrap();
        assert_eq!(loaded, profile);
        assert_eq!(loaded.experience[0].title, "Engineer");
        assert_eq!(loaded.certifications, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_name_collision_versions_instead_of_overwriting() {
        let (_dir, store) = store().await;
        let profile = sample_profile();

        let first = store.save("ada", &profile, false).await.unwrap();
        let second = store.save("ada", &Profile::default(), false).await.unwrap();
        let third = store.save("ada", &Profile::default(), false).await.unwrap();

        assert_eq!(first.profile_name, "ada");
        assert_eq!(second.profile_name, "ada_v2");
        assert_eq!(third.profile_name, "ada_v3");
        assert_eq!(store.load("ada").await.unwrap(), profile);
        assert_eq!(store.list().await.unwrap(), vec!["ada", "ada_v2", "ada_v3"]);
    }

    #[tokio::test]
    async fn test_replace_overwrites_same_file() {
        let (_dir, store) = store().await;
        store.save("ada", &sample_profile(), false).await.unwrap();
        let saved = store.save("ada", &Profile::default(), true).await.unwrap();
        assert_eq!(saved.profile_name, "ada");
        assert_eq!(store.load("ada").await.unwrap(), Profile::default());
        assert_eq!(store.list().await.unwrap(), vec!["ada"]);
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let (_dir, store) = store().await;
        let err = store.load("ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_load_migrates_legacy_graduation_date() {
        let (_dir, store) = store().await;
        let legacy = serde_json::json!({
            "personal_info": {"name": "Grace"},
            "education": [
                {"degree": "BSc", "institution": "Yale", "graduation_date": "May 2024"},
                {"degree": "MSc", "institution": "Yale", "graduation_date": "2026 (expected)"}
            ]
        });
        tokio::fs::write(
            store.path_for("grace"),
            serde_json::to_vec(&legacy).unwrap(),
        )
        .await
        .unwrap();

        let profile = store.load("grace").await.unwrap();
        assert_eq!(
            profile.education[0],
            Education {
                degree: "BSc".to_string(),
                institution: "Yale".to_string(),
                start_date: "May 2020".to_string(),
                end_date: "May 2024".to_string(),
                ..Default::default()
            }
        );
        assert_eq!(profile.education[1].end_date, "2026 (expected)");
        assert_eq!(profile.education[1].start_date, "");
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let (_dir, store) = store().await;
        store.save("ada", &sample_profile(), false).await.unwrap();
        assert!(store.delete("ada").await.unwrap());
        assert!(!store.delete("ada").await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backup_dir_fallback_for_load_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let backup = dir.path().join("profiles_backup");
        tokio::fs::create_dir_all(&backup).await.unwrap();
        tokio::fs::write(
            backup.join("restored.json"),
            serde_json::to_vec(&sample_profile()).unwrap(),
        )
        .await
        .unwrap();

        let store = ProfileStore::open(
            dir.path().join("profiles"),
            vec![backup, dir.path().join("missing")],
        )
        .await
        .unwrap();

        assert_eq!(store.list().await.unwrap(), vec!["restored"]);
        assert_eq!(store.load("restored").await.unwrap(), sample_profile());

        store.save("fresh", &Profile::default(), false).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec!["fresh"]);
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("  Jane   Doe.  ").unwrap(), "Jane Doe");
        assert_eq!(clean_name("v1.2 resume").unwrap(), "v12 resume");
        assert!(matches!(clean_name("   "), Err(StoreError::InvalidName(_))));
        assert!(matches!(clean_name("..."), Err(StoreError::InvalidName(_))));
        assert!(matches!(clean_name("a/b"), Err(StoreError::InvalidName(_))));
    }
}
