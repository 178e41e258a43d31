//! Maven lifecycle phase tables
//!
//! A target handed to the tool is either a well-known lifecycle phase or a
//! plugin goal; anything not in the phase tables is treated as a goal.

/// Phases of the default lifecycle, in execution order
pub const DEFAULT_LIFECYCLE: &[&str] = &[
    "validate",
    "initialize",
    "generate-sources",
    "process-sources",
    "generate-resources",
    "process-resources",
    "compile",
    "process-classes",
    "generate-test-sources",
    "process-test-sources",
    "generate-test-resources",
    "process-test-resources",
    "test-compile",
    "process-test-classes",
    "test",
    "prepare-package",
    "package",
    "pre-integration-test",
    "integration-test",
    "post-integration-test",
    "verify",
    "install",
    "deploy",
];

/// Phases of the clean lifecycle, in execution order
pub const CLEAN_LIFECYCLE: &[&str] = &["pre-clean", "clean", "post-clean"];

/// Phases of the site lifecycle, in execution order
pub const SITE_LIFECYCLE: &[&str] = &["pre-site", "site", "post-site", "site-deploy"];

/// Every known phase across all lifecycles, sorted
pub fn all_phases() -> Vec<&'static str> {
    let mut phases: Vec<&'static str> = DEFAULT_LIFECYCLE
        .iter()
        .chain(CLEAN_LIFECYCLE)
        .chain(SITE_LIFECYCLE)
        .copied()
        .collect();
    phases.sort_unstable();
    phases
}

/// Look up a lifecycle's phases by name (`default`, `clean`, `site`)
pub fn lifecycle_phases(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "default" => Some(DEFAULT_LIFECYCLE),
        "clean" => Some(CLEAN_LIFECYCLE),
        "site" => Some(SITE_LIFECYCLE),
        _ => None,
    }
}

/// Whether `target` names a lifecycle phase (case-insensitive)
pub fn is_phase(target: &str) -> bool {
    let lowered = target.to_ascii_lowercase();
    DEFAULT_LIFECYCLE
        .iter()
        .chain(CLEAN_LIFECYCLE)
        .chain(SITE_LIFECYCLE)
        .any(|phase| *phase == lowered)
}

/// Whether `target` names a plugin goal rather than a phase
pub fn is_goal(target: &str) -> bool {
    !is_phase(target)
}
