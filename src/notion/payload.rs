//! Helpers for constructing Notion page bodies.

use crate::notion::types::VideoRecord;
use crate::processing::ContentChunk;
use serde_json::{Value, json};

/// Wrap one chunk as a paragraph block, the unit Notion stores per text field.
pub(crate) fn paragraph_block(chunk: &ContentChunk) -> Value {
    json!({
        "object": "block",
        "paragraph": {
            "rich_text": [
                { "text": { "content": chunk.text } }
            ],
            "color": "default"
        }
    })
}

/// Build the `pages.create` request body for one video record.
///
/// Start and end date are both set to the published date; the category and
/// subcategory tags are fixed per run.
pub(crate) fn build_page_body(
    database_id: &str,
    category_tag: &str,
    subcategory_tag: &str,
    record: &VideoRecord,
) -> Value {
    let children: Vec<Value> = record.chunks.iter().map(paragraph_block).collect();
    json!({
        "parent": { "database_id": database_id },
        "properties": {
            "Title": {
                "title": [{ "text": { "content": record.title } }]
            },
            "Category": {
                "multi_select": [{ "name": category_tag }]
            },
            "Sub Category": {
                "multi_select": [{ "name": subcategory_tag }]
            },
            "Start Date": {
                "date": { "start": record.date }
            },
            "End Date": {
                "date": { "start": record.date }
            }
        },
        "children": children
    })
}
