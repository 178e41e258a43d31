//! Maven version detection
//!
//! The version probe runs `mvn --version` and scans the output line by line
//! against named regex matchers. Each supported major-version family
//! contributes its own `maven` matcher and shares the java matchers.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::error::{MavenError, Result};
use crate::system::ProcessRunner;

static MAVEN2_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Apache Maven (?P<value>2\.\d+\.\d+) \(.+\)$").expect("maven 2.x matcher"));

static MAVEN3_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Apache Maven (?P<value>3\.\d+\.\d+) \(.+\)$").expect("maven 3.x matcher"));

static JAVA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Java version: (?P<value>[^,]+)").expect("java version matcher"));

static JAVA_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Java home: (?P<value>.+)$").expect("java home matcher"));

/// A named matcher; the `value` capture group carries the detected string
#[derive(Debug, Clone, Copy)]
pub struct VersionMatcher {
    pub name: &'static str,
    pub regex: &'static Regex,
}

/// Supported maven major-version families, newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFamily {
    Maven3,
    Maven2,
}

impl VersionFamily {
    /// The family's `maven` matcher followed by the shared java matchers
    pub fn matchers(&self) -> Vec<VersionMatcher> {
        let family_regex = match self {
            VersionFamily::Maven3 => &*MAVEN3_RE,
            VersionFamily::Maven2 => &*MAVEN2_RE,
        };
        vec![
            VersionMatcher { name: "maven", regex: family_regex },
            VersionMatcher { name: "java", regex: &JAVA_RE },
            VersionMatcher { name: "java_path", regex: &JAVA_PATH_RE },
        ]
    }
}

impl fmt::Display for VersionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionFamily::Maven3 => write!(f, "Maven 3.x"),
            VersionFamily::Maven2 => write!(f, "Maven 2.x"),
        }
    }
}

/// Fields detected from a version probe. Ephemeral, never persisted.
#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub family: VersionFamily,
    pub maven: String,
    pub java: Option<String>,
    pub java_path: Option<String>,
}

/// Scan `output` line by line against `matchers`.
///
/// Matchers are tried in the given order; the first matcher to match a line
/// wins that line, and the first value captured for a name wins that name.
/// Returns `None` unless a `maven` entry was captured, since without it the
/// tool's identity is unconfirmed.
pub fn detect_version(output: &str, matchers: &[VersionMatcher]) -> Option<BTreeMap<String, String>> {
    let mut detected: BTreeMap<String, String> = BTreeMap::new();

    for line in output.lines() {
        let line = line.trim_end();
        for matcher in matchers {
            if let Some(caps) = matcher.regex.captures(line) {
                if let Some(value) = caps.name("value") {
                    detected
                        .entry(matcher.name.to_string())
                        .or_insert_with(|| value.as_str().trim().to_string());
                }
                break;
            }
        }
    }

    if detected.contains_key("maven") { Some(detected) } else { None }
}

/// Run the version probe against `executable` and classify the output.
///
/// Distinguishes a failed probe process ([`MavenError::VersionProbeFailed`])
/// from output that matched no known family
/// ([`MavenError::VersionUnrecognized`]).
pub fn probe_version(executable: &Path, runner: &dyn ProcessRunner) -> Result<VersionInfo> {
    let argv = vec![executable.display().to_string(), "--version".to_string()];
    let run = runner.run(&argv, None, &BTreeMap::new())?;

    if run.exit_code != 0 {
        return Err(MavenError::VersionProbeFailed {
            exit_code: run.exit_code,
            output: run.output,
        });
    }

    for family in [VersionFamily::Maven3, VersionFamily::Maven2] {
        if let Some(mut detected) = detect_version(&run.output, &family.matchers()) {
            let maven = detected.remove("maven").unwrap_or_default();
            debug!("detected {} ({})", family, maven);
            return Ok(VersionInfo {
                family,
                maven,
                java: detected.remove("java"),
                java_path: detected.remove("java_path"),
            });
        }
    }

    Err(MavenError::VersionUnrecognized { output: run.output })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubRunner;
    use std::path::PathBuf;

    const MAVEN3_OUTPUT: &str = "Apache Maven 3.8.1 (05c21c65bdfed0f71a2f2ada8b84da59348c4c5d)\n\
                                 Maven home: /opt/maven\n\
                                 Java version: 1.8.0_291, vendor: Oracle Corporation\n\
                                 Java home: /usr/lib/jvm/java-8-openjdk\n";

    #[test]
    fn test_detects_maven_and_java_fields() {
        let detected = detect_version(MAVEN3_OUTPUT, &VersionFamily::Maven3.matchers()).unwrap();

        assert_eq!(detected["maven"], "3.8.1");
        assert_eq!(detected["java"], "1.8.0_291");
        assert_eq!(detected["java_path"], "/usr/lib/jvm/java-8-openjdk");
    }

    #[test]
    fn test_no_maven_line_returns_none() {
        let output = "Java version: 1.8.0_291, vendor: Oracle Corporation\n";

        assert!(detect_version(output, &VersionFamily::Maven3.matchers()).is_none());
    }

    #[test]
    fn test_family_mismatch_returns_none() {
        let output = "Apache Maven 2.2.1 (r801777)\n";

        assert!(detect_version(output, &VersionFamily::Maven3.matchers()).is_none());
        assert!(detect_version(output, &VersionFamily::Maven2.matchers()).is_some());
    }

    #[test]
    fn test_first_value_wins_for_repeated_lines() {
        let output = "Apache Maven 3.8.1 (aaa)\nApache Maven 3.9.9 (bbb)\n";
        let detected = detect_version(output, &VersionFamily::Maven3.matchers()).unwrap();

        assert_eq!(detected["maven"], "3.8.1");
    }

    #[test]
    fn test_probe_classifies_maven3() {
        let runner = StubRunner::new(0, MAVEN3_OUTPUT);
        let info = probe_version(&PathBuf::from("/usr/bin/mvn"), &runner).unwrap();

        assert_eq!(info.family, VersionFamily::Maven3);
        assert_eq!(info.maven, "3.8.1");
        assert_eq!(info.java.as_deref(), Some("1.8.0_291"));
        assert_eq!(info.java_path.as_deref(), Some("/usr/lib/jvm/java-8-openjdk"));

        let calls = runner.calls();
        assert_eq!(calls[0].argv, ["/usr/bin/mvn", "--version"]);
    }

    #[test]
    fn test_probe_nonzero_exit_is_probe_failure() {
        let runner = StubRunner::new(1, "some error\n");
        let err = probe_version(&PathBuf::from("/usr/bin/mvn"), &runner).unwrap_err();

        assert!(matches!(err, MavenError::VersionProbeFailed { exit_code: 1, .. }));
    }

    #[test]
    fn test_probe_unrecognized_output_is_distinct_error() {
        let runner = StubRunner::new(0, "Gradle 8.5\n");
        let err = probe_version(&PathBuf::from("/usr/bin/mvn"), &runner).unwrap_err();

        assert!(matches!(err, MavenError::VersionUnrecognized { .. }));
    }
}
