//! Prompt templates for ad generation.
//!
//! Pure string templating around a fixed feature/benefit/meaning persuasion
//! formula. Both templates close with the same output-format instruction so
//! the response parser has labels to look for; the parser still tolerates
//! responses that ignore it.

/// Closing instruction shared by both templates. Keeps the model's output in
/// the `Headline:` / `Ad copy:` shape the parser matches first.
const FORMAT_INSTRUCTION: &str = "Make sure to return:\n\
     - \"Headline: ...\" (Catchy ad headline)\n\
     - \"Ad copy: ...\" (Ad description in a paragraph)";

/// Fields supplied directly by the client for manually described products.
///
/// The five required fields are validated by the caller before the prompt is
/// built; the optional ones add steering lines only when present.
#[derive(Debug, Clone)]
pub struct ManualAdFields {
    pub brand_name: String,
    pub product_name: String,
    pub product_description: String,
    pub target_audience: String,
    pub unique_selling_points: String,
    pub brand_voice: Option<String>,
    pub tone: Option<String>,
    pub goal: Option<String>,
}

/// Builds the generation prompt for the scraped path.
///
/// Interpolates the extracted product name and description plus the audience
/// description; an empty audience description becomes `General` so the
/// template never carries a blank line.
#[must_use]
pub fn scraped_prompt(
    product_name: &str,
    product_description: &str,
    audience_description: &str,
) -> String {
    let audience = if audience_description.trim().is_empty() {
        "General"
    } else {
        audience_description
    };

    format!(
        "You are an AI that generates ad copy based on feature+benefit+meaning\n\
         feature = what it is\n\
         benefit = what it does\n\
         meaning = what it means to the buyer/reader/prospect\n\
         formula = it____(feature)so you can ____(benefit)which means_________(meaning)\n\
         Using this formula, create an advertisement and a headline for:\n\
         - Product Name: {product_name}\n\
         - Features: {product_description}\n\
         - Target Audience: {audience}\n\
         \n\
         {FORMAT_INSTRUCTION}"
    )
}

/// Builds the generation prompt for the manual path.
///
/// Required fields always appear; brand voice, tone, and goal lines are
/// added only when the field is present and non-blank.
#[must_use]
pub fn manual_prompt(fields: &ManualAdFields) -> String {
    let mut prompt = format!(
        "Generate an engaging ad for the following product:\n\
         Brand: {}\n\
         Product: {}\n\
         Description: {}\n\
         Target Audience: {}\n\
         Unique Selling Points: {}\n",
        fields.brand_name,
        fields.product_name,
        fields.product_description,
        fields.target_audience,
        fields.unique_selling_points,
    );

    if let Some(voice) = non_blank(fields.brand_voice.as_deref()) {
        prompt.push_str(&format!("Brand Voice: {voice}\n"));
    }
    if let Some(tone) = non_blank(fields.tone.as_deref()) {
        prompt.push_str(&format!("Tone: {tone}\n"));
    }
    if let Some(goal) = non_blank(fields.goal.as_deref()) {
        prompt.push_str(&format!("Goal: {goal}\n"));
    }

    prompt.push('\n');
    prompt.push_str(FORMAT_INSTRUCTION);
    prompt
}

fn non_blank(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ManualAdFields {
        ManualAdFields {
            brand_name: "Acme".to_string(),
            product_name: "Rocket Skates".to_string(),
            product_description: "Battery-powered skates.".to_string(),
            target_audience: "Commuters".to_string(),
            unique_selling_points: "Fast, foldable".to_string(),
            brand_voice: None,
            tone: None,
            goal: None,
        }
    }

    #[test]
    fn scraped_prompt_interpolates_facts_and_audience() {
        let prompt = scraped_prompt(
            "Comfy Scarf",
            "A soft knit scarf.",
            "Dynamic and ambitious women aged 18-25",
        );

        assert!(prompt.contains("- Product Name: Comfy Scarf"));
        assert!(prompt.contains("- Features: A soft knit scarf."));
        assert!(prompt.contains("- Target Audience: Dynamic and ambitious women aged 18-25"));
        assert!(prompt.contains("feature+benefit+meaning"));
    }

    #[test]
    fn empty_audience_description_becomes_general() {
        let prompt = scraped_prompt("Comfy Scarf", "A soft knit scarf.", "");
        assert!(
            prompt.contains("- Target Audience: General"),
            "expected General audience line, got:\n{prompt}"
        );
    }

    #[test]
    fn both_templates_request_labeled_output() {
        let scraped = scraped_prompt("A", "B", "C");
        let manual = manual_prompt(&fields());

        for prompt in [&scraped, &manual] {
            assert!(prompt.contains("\"Headline: ...\""));
            assert!(prompt.contains("\"Ad copy: ...\""));
        }
    }

    #[test]
    fn manual_prompt_carries_required_fields() {
        let prompt = manual_prompt(&fields());

        assert!(prompt.contains("Brand: Acme"));
        assert!(prompt.contains("Product: Rocket Skates"));
        assert!(prompt.contains("Description: Battery-powered skates."));
        assert!(prompt.contains("Target Audience: Commuters"));
        assert!(prompt.contains("Unique Selling Points: Fast, foldable"));
    }

    #[test]
    fn optional_steering_lines_appear_only_when_present() {
        let bare = manual_prompt(&fields());
        assert!(!bare.contains("Brand Voice:"));
        assert!(!bare.contains("Tone:"));
        assert!(!bare.contains("Goal:"));

        let mut steered = fields();
        steered.brand_voice = Some("Playful".to_string());
        steered.tone = Some("Urgent".to_string());
        steered.goal = Some("Signups".to_string());
        let prompt = manual_prompt(&steered);
        assert!(prompt.contains("Brand Voice: Playful"));
        assert!(prompt.contains("Tone: Urgent"));
        assert!(prompt.contains("Goal: Signups"));
    }

    #[test]
    fn blank_optional_fields_are_skipped() {
        let mut blank = fields();
        blank.brand_voice = Some("   ".to_string());
        let prompt = manual_prompt(&blank);
        assert!(!prompt.contains("Brand Voice:"));
    }

    #[test]
    fn prompts_are_deterministic() {
        let a = scraped_prompt("X", "Y", "Z");
        let b = scraped_prompt("X", "Y", "Z");
        assert_eq!(a, b);
    }
}
