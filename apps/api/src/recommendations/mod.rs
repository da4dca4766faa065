//! Recommendations: AI-generated career advice for a (career, skills) pair.
//!
//! Pluggable behind the `Recommender` trait. `AppState` holds an
//! `Option<Arc<dyn Recommender>>`; `None` when no OpenAI key is configured.

pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::recommendations::prompts::RECOMMENDATION_PROMPT_TEMPLATE;

/// A learning resource for a single skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub link: String,
}

/// Structured advice returned by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, career: &str, skills: &[String]) -> Result<Recommendations, AppError>;

    /// Short label for logs.
    fn backend(&self) -> &str;
}

/// Recommender backed by the OpenAI chat-completions API.
pub struct LlmRecommender(pub LlmClient);

#[async_trait]
impl Recommender for LlmRecommender {
    async fn recommend(&self, career: &str, skills: &[String]) -> Result<Recommendations, AppError> {
        let prompt = build_prompt(career, skills);
        self.0
            .call_json::<Recommendations>(&prompt)
            .await
            .map_err(|e| AppError::Llm(format!("recommendation generation failed: {e}")))
    }

    fn backend(&self) -> &str {
        self.0.model()
    }
}

pub fn build_prompt(career: &str, skills: &[String]) -> String {
    let skills = skills.join(", ");
    fill_template(
        RECOMMENDATION_PROMPT_TEMPLATE,
        &[
            ("{json_only}", JSON_ONLY_INSTRUCTION),
            ("{career}", career),
            ("{skills}", skills.as_str()),
        ],
    )
}

/// Single left-to-right pass over `template`; substituted text is never rescanned.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match values.iter().find(|(key, _)| rest.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &rest[key.len()..];
            }
            None => {
                out.push('{');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::parse_embedded_json;

    #[test]
    fn test_prompt_mentions_career_and_skills() {
        let prompt = build_prompt("Data Scientist", &["Python".to_string(), "SQL".to_string()]);
        assert!(prompt.contains("\"Data Scientist\""));
        assert!(prompt.contains("Python, SQL"));
        assert!(prompt.contains("Data Scientist career path"));
        assert!(prompt.contains("ONLY JSON"));
        assert!(!prompt.contains("{career}"));
        assert!(!prompt.contains("{skills}"));
    }

    #[test]
    fn test_prompt_keeps_placeholder_text_in_input_literal() {
        let prompt = build_prompt("Data Scientist", &["{career}".to_string()]);
        assert!(prompt.contains("has these skills: {career}."));

        let prompt = build_prompt("{skills}", &["Python".to_string()]);
        assert!(prompt.contains("career of \"{skills}\""));
        assert!(prompt.contains("has these skills: Python."));
    }

    #[test]
    fn test_fill_template_leaves_unknown_braces() {
        let filled = fill_template("{\"a\": {x}} {y}", &[("{x}", "1")]);
        assert_eq!(filled, "{\"a\": 1} {y}");
    }

    #[test]
    fn test_recommendations_parse_from_model_reply() {
        let reply = r#"Here is your plan:
        {
          "missingSkills": ["Statistics", "Pandas"],
          "recommendations": ["Take a stats course"],
          "nextSteps": ["Build a portfolio project"],
          "resources": [{"skill": "Pandas", "resource": "Docs", "link": "https://pandas.pydata.org"}]
        }"#;
        let parsed: Recommendations = parse_embedded_json(reply).unwrap();
        assert_eq!(parsed.missing_skills, vec!["Statistics", "Pandas"]);
        assert_eq!(parsed.next_steps.len(), 1);
        assert_eq!(parsed.resources[0].skill, "Pandas");
    }

    #[test]
    fn test_recommendations_tolerate_missing_fields() {
        let parsed: Recommendations = parse_embedded_json(r#"{"missingSkills": ["Go"]}"#).unwrap();
        assert_eq!(parsed.missing_skills, vec!["Go"]);
        assert!(parsed.resources.is_empty());
    }

    #[test]
    fn test_recommendations_serialize_camel_case() {
        let json = serde_json::to_value(Recommendations::default()).unwrap();
        assert!(json.get("missingSkills").is_some());
        assert!(json.get("nextSteps").is_some());
    }
}
