pub const CHAT_SYSTEM: &str = include_str!("../data/prompts/chat_system.txt");
pub const CHAT_USER: &str = include_str!("../data/prompts/chat_user.txt");
pub const IMAGE_PROMPT: &str = include_str!("../data/prompts/image_prompt.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Wrap a content idea in the fixed image-generation constraints.
pub fn build_image_prompt(idea: &str) -> String {
    render(IMAGE_PROMPT, &[("idea", idea.trim())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{title}}: {{summary}}", &[("title", "Quarks"), ("summary", "tiny")]),
            "Quarks: tiny"
        );
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(render("{{a}} {{b}}", &[("a", "x")]), "x {{b}}");
    }

    #[test]
    fn test_prompts_are_non_empty() {
        assert!(!CHAT_SYSTEM.is_empty());
        assert!(!CHAT_USER.is_empty());
        assert!(!IMAGE_PROMPT.is_empty());
    }

    #[test]
    fn test_chat_user_has_placeholders() {
        assert!(CHAT_USER.contains("{{title}}"));
        assert!(CHAT_USER.contains("{{summary}}"));
    }

    #[test]
    fn test_image_prompt_keeps_constraints_for_any_idea() {
        for idea in [
            "A glowing neutron star over a calm sea",
            "",
            "[Failed to generate idea: API error (status 429)]",
            "{{idea}} with text everywhere",
        ] {
            let prompt = build_image_prompt(idea);
            assert!(prompt.contains("Do not use Text!"));
            assert!(prompt.contains("realistic"));
            assert!(prompt.contains(idea.trim()));
        }
    }

    #[test]
    fn test_image_prompt_is_deterministic() {
        assert_eq!(
            build_image_prompt("Cells dividing"),
            build_image_prompt("Cells dividing")
        );
    }
}
