use crate::types::NewsItem;

const CONTEXT_SUMMARY_CHARS: usize = 200;

/// Render items as a numbered, human-readable news digest.
pub fn format_news_digest(items: &[NewsItem], max_items: usize) -> String {
    if items.is_empty() {
        return "No news found.".to_string();
    }

    let mut digest = String::from("Latest news:\n\n");
    for (i, item) in items.iter().take(max_items).enumerate() {
        digest.push_str(&format!("{}. {}\n", i + 1, item.title));
        digest.push_str(&format!("   Source: {}", item.source));
        if item.has_known_date() {
            digest.push_str(&format!(" | {}", item.published.format("%d.%m.%Y %H:%M")));
        }
        digest.push('\n');
        if let Some(link) = &item.link {
            digest.push_str(&format!("   Link: {}\n", link));
        }
        digest.push('\n');
    }
    digest
}

/// Abbreviated context block injected into generation prompts. Empty input
/// renders as an empty string so the block can simply be omitted.
pub fn format_news_context(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut block = String::from("CURRENT NEWS ON THE TOPIC:\n\n");
    for (i, item) in items.iter().enumerate() {
        block.push_str(&format!("{}. {}\n", i + 1, item.title));
        if let Some(summary) = &item.summary {
            block.push_str(&format!(
                "   {}\n",
                clip_chars(summary, CONTEXT_SUMMARY_CHARS)
            ));
        }
        block.push_str(&format!("   Source: {}\n\n", item.source));
    }
    block
}

/// Full article listing for the news-summary prompt, summaries unclipped.
pub fn format_articles_for_prompt(items: &[NewsItem]) -> String {
    let mut listing = String::new();
    for (i, item) in items.iter().enumerate() {
        listing.push_str(&format!("{}. {}\n", i + 1, item.title));
        if let Some(summary) = &item.summary {
            listing.push_str(&format!("   {}\n", summary));
        }
        listing.push_str(&format!("   Source: {}\n\n", item.source));
    }
    listing
}

fn clip_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let clipped: String = text.chars().take(max_chars).collect();
        format!("{}...", clipped)
    }
}
