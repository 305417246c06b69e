use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed palette offered by the highlight toolbar.
pub const HIGHLIGHT_PALETTE: [(&str, &str, &str); 6] = [
    ("yellow", "#ffeb3b", "Yellow"),
    ("blue", "#2196f3", "Blue"),
    ("green", "#4caf50", "Green"),
    ("purple", "#9c27b0", "Purple"),
    ("orange", "#ff9800", "Orange"),
    ("pink", "#e91e63", "Pink"),
];

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HighlightColor {
    pub name: String,
    pub color: String,
    pub label: String,
}

/// One highlighted stretch of passage text. The frontend owns the DOM spans;
/// this is the record that survives re-rendering.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Highlight {
    pub id: String,
    pub part: u32,
    pub text: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Note {
    pub id: String,
    pub part: u32,
    pub title: String,
    pub content: String,
    /// Passage text the note was attached to, if it came from a selection.
    pub anchor_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// Notes created from a selection inherit a title from the selected text.
fn derive_note_title(anchor_text: &str) -> String {
    let truncated: String = anchor_text.chars().take(50).collect();
    if anchor_text.chars().count() > 50 {
        format!("{}...", truncated)
    } else {
        truncated
    }
}

// Tauri commands for highlights

#[tauri::command]
pub fn get_highlight_colors() -> Vec<HighlightColor> {
    HIGHLIGHT_PALETTE
        .iter()
        .map(|(name, color, label)| HighlightColor {
            name: name.to_string(),
            color: color.to_string(),
            label: label.to_string(),
        })
        .collect()
}

#[tauri::command]
pub async fn add_highlight(part: u32, text: String, color: String) -> Result<Highlight, String> {
    if text.trim().is_empty() {
        return Err("Cannot highlight an empty selection".to_string());
    }
    if !HIGHLIGHT_PALETTE.iter().any(|(name, ..)| *name == color) {
        return Err(format!("Unknown highlight color: {}", color));
    }

    let highlight = Highlight {
        id: Uuid::new_v4().to_string(),
        part,
        text,
        color,
        created_at: Utc::now(),
    };

    let sitting = super::current_sitting();
    let mut sitting = sitting.lock();
    sitting.highlights.push(highlight.clone());
    Ok(highlight)
}

#[tauri::command]
pub async fn remove_highlight(id: String) -> Result<bool, String> {
    let sitting = super::current_sitting();
    let mut sitting = sitting.lock();
    let before = sitting.highlights.len();
    sitting.highlights.retain(|highlight| highlight.id != id);
    Ok(sitting.highlights.len() < before)
}

#[tauri::command]
pub async fn clear_highlights() -> Result<usize, String> {
    let sitting = super::current_sitting();
    let mut sitting = sitting.lock();
    let removed = sitting.highlights.len();
    sitting.highlights.clear();
    info!("Cleared {} highlight(s)", removed);
    Ok(removed)
}

#[tauri::command]
pub async fn list_highlights(part: Option<u32>) -> Result<Vec<Highlight>, String> {
    let sitting = super::current_sitting();
    let sitting = sitting.lock();
    Ok(sitting
        .highlights
        .iter()
        .filter(|highlight| part.map_or(true, |p| highlight.part == p))
        .cloned()
        .collect())
}

// Tauri commands for notes

#[tauri::command]
pub async fn add_note(
    part: u32,
    title: Option<String>,
    content: String,
    anchor_text: Option<String>,
) -> Result<Note, String> {
    if content.trim().is_empty() {
        return Err("Note content cannot be empty".to_string());
    }

    let title = match title.filter(|t| !t.trim().is_empty()) {
        Some(title) => title,
        None => match anchor_text.as_deref() {
            Some(anchor) if !anchor.trim().is_empty() => derive_note_title(anchor),
            _ => return Err("Please enter a note title".to_string()),
        },
    };

    let now = Utc::now();
    let note = Note {
        id: Uuid::new_v4().to_string(),
        part,
        title,
        content,
        anchor_text,
        created_at: now,
        last_modified: now,
    };

    let sitting = super::current_sitting();
    let mut sitting = sitting.lock();
    sitting.notes.push(note.clone());
    Ok(note)
}

#[tauri::command]
pub async fn update_note(
    id: String,
    title: Option<String>,
    content: Option<String>,
) -> Result<Note, String> {
    let sitting = super::current_sitting();
    let mut sitting = sitting.lock();

    let note = sitting
        .notes
        .iter_mut()
        .find(|note| note.id == id)
        .ok_or_else(|| "Note not found".to_string())?;

    if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
        note.title = title;
    }
    if let Some(content) = content.filter(|c| !c.trim().is_empty()) {
        note.content = content;
    }
    note.last_modified = Utc::now();

    Ok(note.clone())
}

#[tauri::command]
pub async fn delete_note(id: String) -> Result<bool, String> {
    let sitting = super::current_sitting();
    let mut sitting = sitting.lock();
    let before = sitting.notes.len();
    sitting.notes.retain(|note| note.id != id);
    Ok(sitting.notes.len() < before)
}

/// All notes for the sitting, most recently modified first.
#[tauri::command]
pub async fn list_notes() -> Result<Vec<Note>, String> {
    let sitting = super::current_sitting();
    let sitting = sitting.lock();
    let mut notes = sitting.notes.clone();
    notes.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    Ok(notes)
}
