//! Career catalog: the static table of careers and their weighted skill tiers.
//!
//! Built once at startup (built-in table or `CAREERS_FILE`) and carried in
//! `AppState` as an `Arc<CareerCatalog>`. Never reloaded at runtime.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Skill tiers for a single career, highest weight first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerProfile {
    #[serde(default)]
    pub essential: Vec<String>,
    #[serde(default)]
    pub important: Vec<String>,
    #[serde(default)]
    pub nice_to_have: Vec<String>,
}

impl CareerProfile {
    fn from_static(essential: &[&str], important: &[&str], nice_to_have: &[&str]) -> Self {
        let owned = |tier: &[&str]| -> Vec<String> { tier.iter().map(|s| s.to_string()).collect() };
        Self {
            essential: owned(essential),
            important: owned(important),
            nice_to_have: owned(nice_to_have),
        }
    }

    /// Each skill may appear at most once within a tier.
    fn check_unique_tiers(&self) -> Result<()> {
        let tiers = [
            ("essential", &self.essential),
            ("important", &self.important),
            ("niceToHave", &self.nice_to_have),
        ];
        for (tier_name, tier) in tiers {
            let mut seen = HashSet::new();
            if let Some(repeat) = tier.iter().find(|skill| !seen.insert(skill.as_str())) {
                bail!("skill '{repeat}' is listed more than once in tier '{tier_name}'");
            }
        }
        Ok(())
    }

    /// All skills across tiers, essential first.
    pub fn all_skills(&self) -> impl Iterator<Item = &str> {
        self.essential
            .iter()
            .chain(&self.important)
            .chain(&self.nice_to_have)
            .map(String::as_str)
    }
}

/// Immutable mapping of career name → profile.
#[derive(Debug, Clone, Default)]
pub struct CareerCatalog {
    profiles: BTreeMap<String, CareerProfile>,
}

impl CareerCatalog {
    pub fn new(profiles: BTreeMap<String, CareerProfile>) -> Self {
        Self { profiles }
    }

    /// Exact-name lookup. Unknown careers return `None`.
    pub fn get(&self, career: &str) -> Option<&CareerProfile> {
        self.profiles.get(career)
    }

    /// Career names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CareerProfile)> {
        self.profiles.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Loads a catalog from a JSON object of `{career: {essential, important, niceToHave}}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read careers file '{}'", path.display()))?;
        let profiles: BTreeMap<String, CareerProfile> = serde_json::from_str(&raw)
            .with_context(|| format!("Careers file '{}' is not valid JSON", path.display()))?;
        for (career, profile) in &profiles {
            profile.check_unique_tiers().with_context(|| {
                format!("Careers file '{}': career '{career}'", path.display())
            })?;
        }
        Ok(Self::new(profiles))
    }

    /// The built-in career table.
    pub fn builtin() -> Self {
        let table: &[(&str, &[&str], &[&str], &[&str])] = &[
            (
                "Full Stack Developer",
                &["JavaScript", "React", "Node.js", "SQL", "REST API", "HTML", "CSS"],
                &["TypeScript", "Git", "MongoDB", "Express", "Docker"],
                &["GraphQL", "AWS", "Redis", "Testing", "CI/CD"],
            ),
            (
                "Frontend Developer",
                &["JavaScript", "HTML", "CSS", "React", "Responsive Design"],
                &["TypeScript", "Git", "Webpack", "Accessibility", "REST API"],
                &["Vue", "Angular", "Tailwind", "Testing", "Figma"],
            ),
            (
                "Backend Developer",
                &["Node.js", "SQL", "REST API", "Git", "Authentication"],
                &["Python", "Java", "Docker", "MongoDB", "Caching"],
                &["Kubernetes", "GraphQL", "Message Queues", "Microservices", "AWS"],
            ),
            (
                "Data Scientist",
                &["Python", "Statistics", "Machine Learning", "SQL", "Pandas"],
                &["NumPy", "Data Visualization", "Scikit-learn", "Jupyter", "R"],
                &["Deep Learning", "TensorFlow", "Spark", "Tableau", "A/B Testing"],
            ),
            (
                "Data Analyst",
                &["SQL", "Excel", "Data Visualization", "Statistics"],
                &["Python", "Tableau", "Power BI", "Pandas"],
                &["R", "Data Cleaning", "Dashboards", "A/B Testing"],
            ),
            (
                "Machine Learning Engineer",
                &["Python", "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch"],
                &["Linear Algebra", "Statistics", "Docker", "SQL", "Git"],
                &["MLOps", "Kubernetes", "Spark", "NLP", "Computer Vision"],
            ),
            (
                "DevOps Engineer",
                &["Linux", "Docker", "Kubernetes", "CI/CD", "Git"],
                &["AWS", "Terraform", "Bash", "Python", "Monitoring"],
                &["Ansible", "Prometheus", "Grafana", "Networking", "Security"],
            ),
            (
                "Cloud Architect",
                &["AWS", "Azure", "Networking", "Security", "Terraform"],
                &["Kubernetes", "Docker", "Linux", "Cost Optimization"],
                &["GCP", "Serverless", "Microservices", "Python"],
            ),
            (
                "Mobile Developer",
                &["Swift", "Kotlin", "Mobile UI", "REST API"],
                &["React Native", "Flutter", "Git", "Firebase"],
                &["App Store Deployment", "Testing", "Performance Optimization"],
            ),
            (
                "Cybersecurity Analyst",
                &["Networking", "Security", "Linux", "Incident Response"],
                &["Python", "SIEM", "Firewalls", "Vulnerability Assessment"],
                &["Penetration Testing", "Cryptography", "Cloud Security", "Forensics"],
            ),
            (
                "UI/UX Designer",
                &["Figma", "User Research", "Wireframing", "Prototyping"],
                &["Design Systems", "Usability Testing", "Accessibility", "HTML"],
                &["CSS", "Adobe XD", "Motion Design", "Information Architecture"],
            ),
            (
                "Product Manager",
                &["Product Strategy", "Roadmapping", "Communication", "User Research"],
                &["Analytics", "Agile", "SQL", "Prioritization"],
                &["A/B Testing", "Wireframing", "Jira", "Stakeholder Management"],
            ),
        ];

        let profiles = table
            .iter()
            .map(|(name, essential, important, nice)| {
                (
                    name.to_string(),
                    CareerProfile::from_static(essential, important, nice),
                )
            })
            .collect();

        Self::new(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_has_full_stack_essentials() {
        let catalog = CareerCatalog::builtin();
        let profile = catalog.get("Full Stack Developer").unwrap();
        assert_eq!(
            profile.essential,
            vec!["JavaScript", "React", "Node.js", "SQL", "REST API", "HTML", "CSS"]
        );
    }

    #[test]
    fn test_builtin_tiers_have_unique_entries() {
        let catalog = CareerCatalog::builtin();
        for (name, profile) in catalog.iter() {
            for tier in [&profile.essential, &profile.important, &profile.nice_to_have] {
                let unique: HashSet<_> = tier.iter().collect();
                assert_eq!(unique.len(), tier.len(), "duplicate skill in a tier of {name}");
            }
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        let catalog = CareerCatalog::builtin();
        assert!(catalog.get("Data Scientist").is_some());
        assert!(catalog.get("data scientist").is_none());
        assert!(catalog.get("Astronaut").is_none());
    }

    #[test]
    fn test_names_are_sorted() {
        let catalog = CareerCatalog::builtin();
        let names: Vec<&str> = catalog.names().collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn test_from_json_file_defaults_missing_tiers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"Rust Developer": {{"essential": ["Rust", "Cargo"], "niceToHave": ["WebAssembly"]}}}}"#
        )
        .unwrap();

        let catalog = CareerCatalog::from_json_file(file.path()).unwrap();
        let profile = catalog.get("Rust Developer").unwrap();
        assert_eq!(profile.essential, vec!["Rust", "Cargo"]);
        assert!(profile.important.is_empty());
        assert_eq!(profile.nice_to_have, vec!["WebAssembly"]);
    }

    #[test]
    fn test_from_json_file_rejects_repeated_skill_in_tier() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"Rust Developer": {{"essential": ["Rust", "Rust", "Go"]}}}}"#
        )
        .unwrap();

        let err = CareerCatalog::from_json_file(file.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Rust Developer"), "{message}");
        assert!(message.contains("'Rust'"), "{message}");
        assert!(message.contains("essential"), "{message}");
    }

    #[test]
    fn test_from_json_file_allows_skill_across_tiers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"Rust Developer": {{"essential": ["Rust"], "niceToHave": ["Rust"]}}}}"#
        )
        .unwrap();
        assert!(CareerCatalog::from_json_file(file.path()).is_ok());
    }

    #[test]
    fn test_from_json_file_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(CareerCatalog::from_json_file(file.path()).is_err());
    }
}
