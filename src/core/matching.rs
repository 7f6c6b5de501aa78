//! Maps the outputs of one multi-module execution back onto module ids.

use crate::domain::model::ModuleResult;
use std::collections::BTreeMap;

fn normalize(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_substring_match(wanted: &str, candidate: &str) -> bool {
    !candidate.is_empty() && (candidate.contains(wanted) || wanted.contains(candidate))
}

/// Finds the output key belonging to `module_id`: case-insensitive, separators
/// ignored, and either side may contain the other. An exact normalized match
/// wins over a substring match.
pub fn match_output_key<'a, I>(module_id: &str, keys: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted = normalize(module_id);
    if wanted.is_empty() {
        return None;
    }

    let keys: Vec<(&'a str, String)> = keys.into_iter().map(|k| (k, normalize(k))).collect();
    keys.iter()
        .find(|(_, candidate)| *candidate == wanted)
        .or_else(|| {
            keys.iter()
                .find(|(_, candidate)| is_substring_match(&wanted, candidate))
        })
        .map(|(key, _)| *key)
}

/// Pairs modules with keys, each key used at most once. Exact matches are
/// claimed first so a broader module cannot take another module's own key.
fn claim_keys<'a>(modules: &[String], keys: &[&'a str]) -> Vec<Option<&'a str>> {
    let mut claimed: Vec<&'a str> = Vec::new();
    let mut assigned: Vec<Option<&'a str>> = modules
        .iter()
        .map(|id| {
            let wanted = normalize(id);
            let exact = keys
                .iter()
                .copied()
                .find(|key| !wanted.is_empty() && normalize(key) == wanted)?;
            claimed.push(exact);
            Some(exact)
        })
        .collect();

    for (slot, id) in assigned.iter_mut().zip(modules) {
        if slot.is_some() {
            continue;
        }
        let free = keys.iter().copied().filter(|key| !claimed.contains(key));
        if let Some(key) = match_output_key(id, free) {
            claimed.push(key);
            *slot = Some(key);
        }
    }

    assigned
}

/// Single-element arrays are how the backend reports a block output.
fn unwrap_output(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Array(items) if items.len() == 1 => items[0].clone(),
        other => other.clone(),
    }
}

/// Builds one result per module. When nothing matches, every module gets the whole blob.
pub fn assign_outputs(
    modules: &[String],
    outputs: &serde_json::Map<String, serde_json::Value>,
) -> BTreeMap<String, ModuleResult> {
    let keys: Vec<&str> = outputs.keys().map(String::as_str).collect();
    let matches: Vec<(&String, Option<&str>)> =
        modules.iter().zip(claim_keys(modules, &keys)).collect();

    if matches.iter().all(|(_, key)| key.is_none()) {
        tracing::debug!(
            "No output key matched any of {} modules, assigning full output",
            modules.len()
        );
        let blob = serde_json::Value::Object(outputs.clone());
        return modules
            .iter()
            .map(|id| (id.clone(), ModuleResult::completed(blob.clone())))
            .collect();
    }

    matches
        .into_iter()
        .map(|(id, key)| {
            let result = match key.and_then(|k| outputs.get(k)) {
                Some(value) => ModuleResult::completed(unwrap_output(value)),
                None => ModuleResult::error(format!("No output produced for module: {}", id)),
            };
            (id.clone(), result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ModuleStatus;
    use serde_json::json;

    fn outputs(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let keys = ["Business_Plan_Output", "summary"];
        assert_eq!(
            match_output_key("business_plan", keys),
            Some("Business_Plan_Output")
        );
    }

    #[test]
    fn test_match_works_in_both_directions() {
        assert_eq!(match_output_key("market_research", ["market"]), Some("market"));
        assert_eq!(match_output_key("ui_ux", ["UI-UX design"]), Some("UI-UX design"));
    }

    #[test]
    fn test_exact_match_wins_over_substring() {
        let keys = ["business", "Business-Advice"];
        assert_eq!(match_output_key("business_advice", keys), Some("Business-Advice"));
    }

    #[test]
    fn test_short_key_is_not_shared_between_modules() {
        let modules = vec!["business_plan".to_string(), "business_advice".to_string()];
        let results = assign_outputs(&modules, &outputs(json!({"business": "shared"})));

        assert_eq!(results["business_plan"], ModuleResult::completed("shared"));
        assert_eq!(results["business_advice"].status, ModuleStatus::Error);
    }

    #[test]
    fn test_exact_key_claimed_before_substring() {
        let modules = vec!["business_plan".to_string(), "business".to_string()];
        let results = assign_outputs(
            &modules,
            &outputs(json!({"business": "general", "business_plan_draft": "plan"})),
        );

        assert_eq!(results["business"], ModuleResult::completed("general"));
        assert_eq!(results["business_plan"], ModuleResult::completed("plan"));
    }

    #[test]
    fn test_no_match_and_empty_keys() {
        assert_eq!(match_output_key("branding", ["summary", "code"]), None);
        assert_eq!(match_output_key("branding", ["__", ""]), None);
    }

    #[test]
    fn test_assign_matched_outputs() {
        let modules = vec!["brainstorm".to_string(), "business_plan".to_string()];
        let results = assign_outputs(
            &modules,
            &outputs(json!({
                "Brainstorm": ["ideas"],
                "business_plan_result": "plan",
            })),
        );

        assert_eq!(results["brainstorm"], ModuleResult::completed("ideas"));
        assert_eq!(results["business_plan"], ModuleResult::completed("plan"));
    }

    #[test]
    fn test_falls_back_to_whole_blob_when_nothing_matches() {
        let modules = vec!["brainstorm".to_string(), "branding".to_string()];
        let blob = json!({"result": "everything"});
        let results = assign_outputs(&modules, &outputs(blob.clone()));

        assert_eq!(results.len(), 2);
        for result in results.values() {
            assert_eq!(result.status, ModuleStatus::Completed);
            assert_eq!(result.content, blob);
        }
    }

    #[test]
    fn test_unmatched_module_reports_error_when_others_match() {
        let modules = vec!["brainstorm".to_string(), "mockups".to_string()];
        let results = assign_outputs(&modules, &outputs(json!({"brainstorm": "ideas"})));

        assert_eq!(results["brainstorm"].status, ModuleStatus::Completed);
        assert_eq!(results["mockups"].status, ModuleStatus::Error);
    }
}
