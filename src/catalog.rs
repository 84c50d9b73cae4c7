use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::eval::{MatrixEntry, TemplateKey, Verdict};
use crate::model::{ActorType, Intent, LoadProfile, Role};

/// Embedded default catalog.
const DEFAULT_CATALOG: &str = include_str!("../catalog.default.toml");

/// Problems that make a catalog unusable. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalog TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("catalog JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("role_intent_matrix has no row for role `{0}`")]
    MissingRole(&'static str),
    #[error("role_intent_matrix.{role} has no entry for intent `{intent}`")]
    MissingCell {
        role: &'static str,
        intent: &'static str,
    },
    #[error("role_intent_matrix has a row for unknown role `{0}`")]
    UnknownRole(String),
    #[error("role_intent_matrix.{role} has an entry for unknown intent `{intent}`")]
    UnknownIntent { role: String, intent: String },
    #[error("no limits defined for load profile `{0}`")]
    MissingProfile(&'static str),
    #[error("template `{0}` is used by the evaluator but not defined")]
    MissingTemplate(&'static str),
    #[error("template `{0}` has empty text")]
    EmptyTemplate(String),
}

// ── Catalog types ──

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Catalog {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub roles: Vec<RoleInfo>,
    #[serde(default)]
    pub intents: Vec<IntentInfo>,
    /// role name → intent name → cell. Names, not enums, so gaps and typos
    /// survive parsing and are reported by [`Catalog::validate`].
    #[serde(default)]
    pub role_intent_matrix: BTreeMap<String, BTreeMap<String, MatrixEntry>>,
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateConfig>,
    #[serde(default)]
    pub energy_rules: BTreeMap<String, EnergyRule>,
    #[serde(default)]
    pub actor_trust_levels: BTreeMap<String, u8>,
    #[serde(default)]
    pub system_rules: Vec<SystemRule>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Append each decision to the decision log.
    #[serde(default = "default_true")]
    pub log_decisions: bool,
    /// Decision log path; `~` is expanded. Empty disables the log.
    #[serde(default)]
    pub decision_log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_decisions: true,
            decision_log: String::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// The decision log path with `~` expanded, if logging is configured.
    pub fn decision_log_path(&self) -> Option<PathBuf> {
        if !self.log_decisions || self.decision_log.trim().is_empty() {
            return None;
        }
        Some(PathBuf::from(
            shellexpand::tilde(self.decision_log.trim()).into_owned(),
        ))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoleInfo {
    pub id: Role,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntentInfo {
    pub id: Intent,
    #[serde(default)]
    pub name: String,
    /// The personal resource this kind of request draws on.
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub limits: ProfileLimits,
}

/// Capacity limits for one load profile. A count at or above a limit is "reached".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfileLimits {
    pub daily_commitments: u32,
    pub weekly_money_requests: u32,
    pub weekly_time_blocks: u32,
    pub concurrent_projects: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TemplateConfig {
    pub text: String,
    /// The verdict this template is written for. Descriptive only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Verdict>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnergyRule {
    #[serde(default)]
    pub modifier: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SystemRule {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub gate: u8,
    #[serde(default)]
    pub action: String,
}

// ── Overlay types (user catalog that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct CatalogOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    role_intent_matrix: MatrixOverlay,
    #[serde(default)]
    profiles: BTreeMap<String, LimitsOverlay>,
    #[serde(default)]
    templates: TemplatesOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    log_decisions: Option<bool>,
    decision_log: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct MatrixOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    set: BTreeMap<String, BTreeMap<String, MatrixEntry>>,
}

#[derive(Debug, Deserialize, Default)]
struct LimitsOverlay {
    daily_commitments: Option<u32>,
    weekly_money_requests: Option<u32>,
    weekly_time_blocks: Option<u32>,
    concurrent_projects: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct TemplatesOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    set: BTreeMap<String, TemplateConfig>,
    #[serde(default)]
    remove: Vec<String>,
}

// ── Merge logic ──

/// Merge user entries into a default map.
/// In replace mode: user map replaces default entirely.
/// In merge mode: remove keys first, then insert additions (overriding).
fn merge_map<V>(
    base: &mut BTreeMap<String, V>,
    add: BTreeMap<String, V>,
    remove: &[String],
    replace: bool,
) {
    if replace {
        *base = add;
    } else {
        base.retain(|key, _| !remove.contains(key));
        base.extend(add);
    }
}

impl Catalog {
    /// Parse and validate the embedded default catalog.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_toml_str(DEFAULT_CATALOG)
    }

    /// Parse and validate a catalog written in TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        let catalog: Self = toml::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog written in JSON.
    pub fn from_json_str(s: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read a complete catalog from disk. `.json` files are parsed as JSON,
    /// anything else as TOML.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Load the catalog with resolution order:
    /// 1. Start with the embedded defaults
    /// 2. Merge the user overlay from ~/.config/commitment-gate/catalog.toml (if it exists)
    ///
    /// Matrix cells, limits, and templates override individually.
    /// Set `replace = true` in `[role_intent_matrix]` or `[templates]` to drop the defaults.
    /// The merged result is validated; an overlay that breaks it is an error.
    pub fn load() -> Result<Self, CatalogError> {
        let mut catalog: Self = toml::from_str(DEFAULT_CATALOG)?;
        if let Some(overlay) = Self::load_overlay()? {
            catalog.apply_overlay(overlay);
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Location of the user overlay, when `HOME` is set.
    pub fn overlay_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(Path::new(&home).join(".config/commitment-gate/catalog.toml"))
    }

    fn load_overlay() -> Result<Option<CatalogOverlay>, CatalogError> {
        let Some(path) = Self::overlay_path() else {
            return Ok(None);
        };
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Ok(None);
        };
        log::debug!("applying catalog overlay from {}", path.display());
        Ok(Some(toml::from_str(&content)?))
    }

    /// Apply an overlay on top of this catalog (merge semantics).
    fn apply_overlay(&mut self, overlay: CatalogOverlay) {
        // Settings: scalar overrides
        if let Some(v) = overlay.settings.log_decisions {
            self.settings.log_decisions = v;
        }
        if let Some(v) = overlay.settings.decision_log {
            self.settings.decision_log = v;
        }

        // Matrix: per-cell overrides
        let m = overlay.role_intent_matrix;
        if m.replace {
            self.role_intent_matrix = m.set;
        } else {
            for (role, cells) in m.set {
                let row = self.role_intent_matrix.entry(role).or_default();
                merge_map(row, cells, &[], false);
            }
        }

        // Profiles: per-limit overrides on existing profiles
        for (name, l) in overlay.profiles {
            let Some(profile) = self.profiles.get_mut(&name) else {
                log::warn!("catalog overlay: ignoring limits for unknown load profile `{name}`");
                continue;
            };
            let limits = &mut profile.limits;
            if let Some(v) = l.daily_commitments {
                limits.daily_commitments = v;
            }
            if let Some(v) = l.weekly_money_requests {
                limits.weekly_money_requests = v;
            }
            if let Some(v) = l.weekly_time_blocks {
                limits.weekly_time_blocks = v;
            }
            if let Some(v) = l.concurrent_projects {
                limits.concurrent_projects = v;
            }
        }

        // Templates
        let t = overlay.templates;
        merge_map(&mut self.templates, t.set, &t.remove, t.replace);
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: CatalogOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }

    /// Startup integrity check: a complete matrix with no unknown names,
    /// limits for every load profile, and non-empty text for every template
    /// the evaluator can emit.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for name in self.role_intent_matrix.keys() {
            if !Role::ALL.iter().any(|r| r.as_str() == name) {
                return Err(CatalogError::UnknownRole(name.clone()));
            }
        }
        for role in Role::ALL {
            let row = self
                .role_intent_matrix
                .get(role.as_str())
                .ok_or(CatalogError::MissingRole(role.as_str()))?;
            for name in row.keys() {
                if name.parse::<Intent>().is_err() {
                    return Err(CatalogError::UnknownIntent {
                        role: role.as_str().to_string(),
                        intent: name.clone(),
                    });
                }
            }
            for intent in Intent::ALL {
                if !row.contains_key(intent.as_str()) {
                    return Err(CatalogError::MissingCell {
                        role: role.as_str(),
                        intent: intent.as_str(),
                    });
                }
            }
        }

        for profile in LoadProfile::ALL {
            if !self.profiles.contains_key(profile.as_str()) {
                return Err(CatalogError::MissingProfile(profile.as_str()));
            }
        }

        for key in TemplateKey::ALL {
            if !self.templates.contains_key(key.as_str()) {
                return Err(CatalogError::MissingTemplate(key.as_str()));
            }
        }
        for (key, template) in &self.templates {
            if template.text.trim().is_empty() {
                return Err(CatalogError::EmptyTemplate(key.clone()));
            }
        }
        Ok(())
    }

    // ── Lookups ──

    /// The matrix cell for a role and intent, if the catalog has one.
    pub fn matrix_entry(&self, role: Role, intent: Intent) -> Option<MatrixEntry> {
        self.role_intent_matrix
            .get(role.as_str())?
            .get(intent.as_str())
            .copied()
    }

    pub fn limits(&self, profile: LoadProfile) -> Option<&ProfileLimits> {
        self.profiles.get(profile.as_str()).map(|p| &p.limits)
    }

    pub fn template(&self, key: &str) -> Option<&TemplateConfig> {
        self.templates.get(key)
    }

    /// All templates, keyed by template key.
    pub fn templates(&self) -> &BTreeMap<String, TemplateConfig> {
        &self.templates
    }

    pub fn role_info(&self, role: Role) -> Option<&RoleInfo> {
        self.roles.iter().find(|r| r.id == role)
    }

    pub fn intent_info(&self, intent: Intent) -> Option<&IntentInfo> {
        self.intents.iter().find(|i| i.id == intent)
    }

    pub fn trust_level(&self, actor: ActorType) -> Option<u8> {
        self.actor_trust_levels.get(actor.as_str()).copied()
    }
}
