//! Formatting helper functions for the sheet MCP server
//!
//! This module renders the sheet tree and question listings as plain text.

use crate::sheet::{Progress, QuestionEntry, QuestionStatus, Sheet, progress};

fn status_marker(status: QuestionStatus) -> &'static str {
    match status {
        QuestionStatus::Todo => "[ ]",
        QuestionStatus::InProgress => "[~]",
        QuestionStatus::Done => "[x]",
    }
}

fn format_progress(p: Progress) -> String {
    format!("{}/{} done ({}%)", p.done, p.total, p.percent)
}

/// Apply status filtering
pub fn apply_status_filter(entries: &mut Vec<QuestionEntry<'_>>, status: QuestionStatus) {
    entries.retain(|e| e.question.status == status);
}

/// Apply tag filtering (tags are stored lowercase, so the filter is normalized too)
pub fn apply_tag_filter(entries: &mut Vec<QuestionEntry<'_>>, tag: &str) {
    let tag = tag.trim().to_lowercase();
    entries.retain(|e| e.question.tags.iter().any(|t| *t == tag));
}

/// Apply keyword filtering (case-insensitive search in title, link and ancestor titles)
pub fn apply_keyword_filter(entries: &mut Vec<QuestionEntry<'_>>, keyword: &str) {
    let keyword_lower = keyword.to_lowercase();
    entries.retain(|e| {
        let title_matches = e.question.title.to_lowercase().contains(&keyword_lower);

        let link_matches = e
            .question
            .link
            .as_ref()
            .map(|l| l.to_lowercase().contains(&keyword_lower))
            .unwrap_or(false);

        let parent_matches = e.topic.title.to_lowercase().contains(&keyword_lower)
            || e.sub_topic.title.to_lowercase().contains(&keyword_lower);

        title_matches || link_matches || parent_matches
    });
}

/// Render a flat question listing
pub fn format_questions(entries: &[QuestionEntry<'_>]) -> String {
    if entries.is_empty() {
        return "No questions found".to_string();
    }

    let mut result = format!("Found {} question(s):\n\n", entries.len());
    for entry in entries {
        let q = entry.question;
        result.push_str(&format!(
            "- {} {} [{}] ({} / {})\n",
            status_marker(q.status),
            q.title,
            q.id,
            entry.topic.title,
            entry.sub_topic.title
        ));
        if let Some(ref link) = q.link {
            result.push_str(&format!("  Link: {}\n", link));
        }
        if !q.tags.is_empty() {
            result.push_str(&format!("  Tags: {}\n", q.tags.join(", ")));
        }
    }
    result
}

/// Render the whole tree with IDs, status and progress
pub fn format_sheet(sheet: &Sheet) -> String {
    let mut result = format!("# {} [{}]\n", sheet.title, sheet.id);
    if let Some(ref slug) = sheet.slug {
        result.push_str(&format!("slug: {}\n", slug));
    }
    result.push_str(&format!("Progress: {}\n", format_progress(progress(Some(sheet)))));
    let tags = sheet.tags();
    if !tags.is_empty() {
        result.push_str(&format!("Tags: {}\n", tags.join(", ")));
    }

    if sheet.topics.is_empty() {
        result.push_str("\nNo topics yet.\n");
        return result;
    }

    for topic in &sheet.topics {
        result.push_str(&format!(
            "\n## {}. {} [{}] - {}\n",
            topic.order + 1,
            topic.title,
            topic.id,
            format_progress(Progress::of_topic(topic))
        ));
        for sub_topic in &topic.sub_topics {
            result.push_str(&format!("### {} [{}]\n", sub_topic.title, sub_topic.id));
            if sub_topic.questions.is_empty() {
                result.push_str("  No questions yet.\n");
            }
            for q in &sub_topic.questions {
                result.push_str(&format!(
                    "  {}. {} {} [{}]",
                    q.order + 1,
                    status_marker(q.status),
                    q.title,
                    q.id
                ));
                if !q.tags.is_empty() {
                    result.push_str(&format!(" #{}", q.tags.join(" #")));
                }
                result.push('\n');
                if let Some(ref link) = q.link {
                    result.push_str(&format!("     {}\n", link));
                }
            }
        }
    }
    result
}
