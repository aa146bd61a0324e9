//! Prompt text and response schemas for each generation call.

use pitchcraft_core::{Description, Narrative, NarrativeField, Platform};
use serde_json::{Map, Value, json};

/// Prompt for the five-part narrative.
pub fn narrative_prompt(description: &Description) -> String {
    format!(
        r#"Based on the following product/idea description, generate a compelling marketing pitch narrative.
Description: "{description}"

Create a narrative with these five elements: a hook, an emotion to target, a conflict, a resolution, and a call to action.
For each of the five elements (hook, emotion, conflict, resolution, CTA), please ensure the response is concise and between 30 and 50 words.
Your response must be in JSON format."#,
        description = description.as_str(),
    )
}

/// Prompt for the five-panel collage.
pub fn image_prompt(narrative: &Narrative, description: &Description) -> String {
    format!(
        r#"Create a visually compelling 5-panel collage that tells a continuous story with consistent characters. The style must be cinematic, photorealistic, and feature real human faces. The collage illustrates a narrative based on the user's idea and the provided pitch.

**CRITICAL INSTRUCTION: The same main character(s) must appear in each relevant panel to show a clear story progression. Maintain their appearance (clothing, features, etc.) as much as possible.**

**CRITICAL INSTRUCTION: Each of the 5 panels must be a unique and distinct image. Do not repeat compositions, poses, or backgrounds. Each panel must clearly advance the story to the next stage, showing a different action or emotional state.**

The overall theme is from this description: "{description}".
The story follows this narrative structure:

- **Panel 1 (Hook):** Start the story. Visually represent "{hook}". Introduce the main character and the initial situation. This should be an attention-grabbing scene.
- **Panel 2 (Emotion & Conflict):** Show the character experiencing the problem. Depict the core conflict from "{conflict}" and evoke the emotion of "{emotion}". This panel should clearly show the character's struggle or pain point.
- **Panel 3 (Discovery):** Bridge the conflict and resolution. Show the character or someone else discovering the solution. This could be finding the product, seeing a crucial detail, or having the 'aha' moment that leads to the solution.
- **Panel 4 (Resolution):** Show the solution in action. Visually represent "{resolution}". The main character should be shown actively using or benefiting from the solution, looking relieved, empowered, or happy.
- **Panel 5 (Call to Action):** Conclude the story with a powerful final image. Based on "{cta}", create a symbolic, photorealistic image showing the positive final outcome or the next step. For example, the character confidently moving forward in their new, improved state.

Maintain a cohesive art style across all panels. Avoid text and cartoonish elements."#,
        description = description.as_str(),
        hook = narrative.hook,
        conflict = narrative.conflict,
        emotion = narrative.emotion,
        resolution = narrative.resolution,
        cta = narrative.cta,
    )
}

/// Prompt for the ten-second video.
pub fn video_prompt(narrative: &Narrative) -> String {
    format!(
        r#"Create a short, dynamic, and engaging 10-second marketing video for the following pitch.
Hook: "{hook}".
Emotion to convey: "{emotion}".
The story starts with the conflict: "{conflict}".
And finds its solution in the resolution: "{resolution}".
End with a powerful visual that reinforces the call to action: "{cta}".
The video should be cinematic and professional. No text overlays."#,
        hook = narrative.hook,
        emotion = narrative.emotion,
        conflict = narrative.conflict,
        resolution = narrative.resolution,
        cta = narrative.cta,
    )
}

/// Prompt for the per-platform social posts.
pub fn social_prompt(narrative: &Narrative, description: &Description) -> String {
    let mut outline = String::new();
    for (field, text) in narrative.fields() {
        outline.push_str(&format!("- {}: {}\n", field.title(), text));
    }

    format!(
        r#"You are a social media marketing expert. Based on the user's business idea and the provided marketing narrative, generate tailored posts for YouTube, Instagram, LinkedIn, Facebook, and X (Twitter).

**CRITICAL: The posts MUST be well-formatted with appropriate line breaks, paragraphs, and spacing for each specific platform to ensure readability. Do not output a single block of text.**

The posts should be engaging, platform-appropriate, and include relevant hashtags.

**User's Business Idea:** "{description}"

**Marketing Narrative:**
{outline}
Now, create the social media posts in the required JSON format, adhering to the formatting instructions in the schema."#,
        description = description.as_str(),
    )
}

/// Response schema with one required string property per narrative field.
pub fn narrative_schema() -> Value {
    object_schema(
        NarrativeField::ALL
            .iter()
            .map(|field| (field.key(), field.schema_description())),
    )
}

/// Response schema with one required string property per platform.
pub fn social_schema() -> Value {
    object_schema(
        Platform::ALL
            .iter()
            .map(|platform| (platform.key(), platform.formatting_instructions())),
    )
}

fn object_schema<'a>(properties: impl Iterator<Item = (&'a str, &'a str)>) -> Value {
    let mut props = Map::new();
    let mut required = Vec::new();
    for (key, description) in properties {
        props.insert(
            key.to_string(),
            json!({ "type": "STRING", "description": description }),
        );
        required.push(Value::String(key.to_string()));
    }
    json!({
        "type": "OBJECT",
        "properties": props,
        "required": required,
    })
}
