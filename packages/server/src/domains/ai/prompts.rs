//! Prompt builders for listing analysis and pitch materials.

use serde_json::Value;

use crate::domains::listings::Listing;
use crate::kernel::pdf::truncate_chars;

/// Characters of script text sent to the model.
pub const MAX_SCRIPT_PROMPT_CHARS: usize = 50_000;

const ANALYSIS_INSTRUCTIONS: &str = r#"Please provide:

1. **Executive Summary** (2-3 paragraphs): What is this story about? What makes it compelling?

2. **Commercial Viability Score** (1-10): Rate the commercial potential and explain why.

3. **Strengths** (3-5 bullet points): What works well? Unique selling points?

4. **Areas for Improvement** (2-3 bullet points): Constructive feedback for development.

5. **Comparable Titles** (3-5 examples): Similar successful films/series with brief explanation why.

6. **Target Audience**: Primary demographic and psychographic profile.

7. **Budget Estimate Range**: Rough production budget range (indie/mid/high).

8. **Key Themes**: Main themes explored in the story.

Return your response in JSON format with these keys:
- executive_summary (string)
- commercial_score (number 1-10)
- commercial_justification (string)
- strengths (array of strings)
- improvements (array of strings)
- comparables (array of objects with "title" and "reason")
- target_audience (string)
- budget_range (string)
- themes (array of strings)"#;

const ONE_PAGER_TEMPLATE: &str = r#"Reference format (based on successful one-pagers):

# [TITLE]

**Logline:** One sentence that captures the essence

## Overview
2-3 paragraphs describing the story, world, and hook

## Key Characters
- **Character Name** - Brief description
- **Character Name** - Brief description

## Market Position
- **Comparables:** Title 1, Title 2, Title 3
- **Target Audience:** Who will love this
- **Format:** Series/Film details

## Visual Style
Description of aesthetic and tone

## Why Now
Why this story is timely and relevant

## Rights & Contact
Rights holder information"#;

const ONE_PAGER_INSTRUCTIONS: &str = r#"Create a professional, compelling one-pager in markdown format. Make it concise (1-2 pages max) but impactful. Focus on:
- Hook the reader immediately
- Clear market positioning
- Strong character appeal
- Commercial viability

Use markdown formatting (headers, bold, lists) for readability."#;

const PITCH_DECK_INSTRUCTIONS: &str = r#"Create a 10-12 slide pitch deck outline with:
- Slide title
- Key points (2-4 bullets per slide)
- Visual suggestions

Return a JSON object of the form {"slides": [...]} where each slide has: slide_number, title, key_points (array), visual_suggestion"#;

/// Plain-text rendering of a listing's metadata, used when no script is readable.
pub fn listing_metadata_text(listing: &Listing) -> String {
    let mut parts = vec![format!("Title: {}", listing.title)];
    if let Some(tagline) = non_empty(&listing.tagline) {
        parts.push(format!("Tagline: {}", tagline));
    }
    parts.push(format!("Genre: {}", listing.genre));
    parts.push(format!("Format: {}", listing.format));
    if let Some(logline) = non_empty(&listing.logline) {
        parts.push(format!("Logline: {}", logline));
    }
    if !listing.description.is_empty() {
        parts.push(format!("\nDescription:\n{}", listing.description));
    }
    if let Some(period) = non_empty(&listing.period) {
        parts.push(format!("Time Period: {}", period));
    }
    if let Some(location) = non_empty(&listing.location) {
        parts.push(format!("Location: {}", location));
    }
    if let Some(world_type) = non_empty(&listing.world_type) {
        parts.push(format!("World Type: {}", world_type));
    }
    if !listing.themes.is_empty() {
        parts.push(format!("Themes: {}", listing.themes.join(", ")));
    }
    if let Some(audience) = non_empty(&listing.target_audience) {
        parts.push(format!("Target Audience: {}", audience));
    }
    if !listing.comparables.is_empty() {
        parts.push(format!("Comparables: {}", listing.comparables.join(", ")));
    }
    parts.join("\n")
}

pub fn analysis_prompt(listing: &Listing, script_text: &str) -> String {
    format!(
        "You are an experienced Hollywood script analyst and IP evaluator. Analyze this script and provide a detailed professional assessment.\n\n\
         **Script Title:** {}\n\
         **Genre:** {}\n\
         **Format:** {}\n\n\
         **Script Text:**\n{}\n\n{}",
        listing.title,
        listing.genre,
        listing.format,
        truncate_chars(script_text, MAX_SCRIPT_PROMPT_CHARS),
        ANALYSIS_INSTRUCTIONS
    )
}

pub fn one_pager_prompt(listing: &Listing, analysis: Option<&Value>) -> String {
    let analysis_block = analysis
        .and_then(|a| serde_json::to_string_pretty(a).ok())
        .map(|json| format!("**AI Analysis:**\n{}\n\n", json))
        .unwrap_or_default();

    format!(
        "You are a professional pitch deck writer for the entertainment industry. Create a compelling one-pager for this IP.\n\n\
         **IP Details:**\n\
         - Title: {}\n\
         - Tagline: {}\n\
         - Genre: {}\n\
         - Format: {}\n\
         - Description: {}\n\
         - Setting: {}, {}\n\
         - Themes: {}\n\n\
         {}{}\n\n{}",
        listing.title,
        listing.tagline.as_deref().unwrap_or(""),
        listing.genre,
        listing.format,
        listing.description,
        listing.period.as_deref().unwrap_or(""),
        listing.location.as_deref().unwrap_or(""),
        listing.themes.join(", "),
        analysis_block,
        ONE_PAGER_TEMPLATE,
        ONE_PAGER_INSTRUCTIONS
    )
}

pub fn pitch_deck_prompt(listing: &Listing, analysis: Option<&Value>) -> String {
    let details = serde_json::json!({
        "title": listing.title,
        "tagline": listing.tagline,
        "description": listing.description,
        "genre": listing.genre,
        "format": listing.format,
        "logline": listing.logline,
        "period": listing.period,
        "location": listing.location,
        "world_type": listing.world_type,
        "themes": listing.themes,
        "target_audience": listing.target_audience,
        "comparables": listing.comparables,
    });
    let details = serde_json::to_string_pretty(&details).unwrap_or_default();
    let analysis = analysis
        .and_then(|a| serde_json::to_string_pretty(a).ok())
        .unwrap_or_else(|| "{}".to_string());

    format!(
        "You are a pitch deck consultant for Hollywood studios. Create a slide-by-slide outline for a pitch deck.\n\n\
         **IP Details:**\n{}\n\n\
         **Analysis:**\n{}\n\n{}",
        details, analysis, PITCH_DECK_INSTRUCTIONS
    )
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
