// Prompt templates for career recommendations.
// Reuses the JSON-only fragment from llm_client::prompts.

/// Replace: {career}, {skills}, {json_only}
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"You are a career counselor. A person is targeting the career of "{career}" and has these skills: {skills}.

{json_only}
{
  "missingSkills": ["skill1", "skill2", "skill3", "skill4", "skill5"],
  "recommendations": ["rec1", "rec2", "rec3"],
  "nextSteps": ["step1", "step2", "step3"],
  "resources": [
    {"skill": "skillname", "resource": "resource type", "link": "https://example.com"},
    {"skill": "skillname", "resource": "resource type", "link": "https://example.com"}
  ]
}

Make recommendations specific, practical, and varied. Focus on the missing skills and {career} career path."#;
