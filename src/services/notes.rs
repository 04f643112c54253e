//! Notes service
//!
//! Sticky-note style records with a free-form category and a palette
//! color picked at creation. Edits replace the record and refresh its
//! `last_modified` stamp.

use crate::analytics;
use crate::config::{collections, NOTE_COLOR_PALETTE};
use crate::error::Result;
use crate::models::{NewNote, Note};
use crate::store::Store;
use chrono::Utc;
use rand::seq::SliceRandom;

#[derive(Clone)]
pub struct NotesService {
    store: Store,
}

impl NotesService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn add_note(&self, new: NewNote) -> Result<Note> {
        new.validate()?;

        let id = self.store.next_id(collections::NOTES).await?;
        let now = Utc::now();
        let note = Note {
            id,
            title: new.title.clone(),
            category: new.category_or_default(),
            content: new.content.clone(),
            created: now,
            last_modified: now,
            color: random_note_color(),
        };

        let stored = note.clone();
        self.store
            .mutate::<Note, _, _>(collections::NOTES, move |notes| notes.push(stored))
            .await?;

        tracing::info!("Created note {}: {}", note.id, note.title);
        Ok(note)
    }

    /// Replace a note's content, keyed by id. The creation stamp and
    /// color survive; `last_modified` is refreshed. Unknown ids are a
    /// silent no-op.
    pub async fn update_note(&self, id: u64, new: NewNote) -> Result<Option<Note>> {
        new.validate()?;

        let category = new.category_or_default();
        self.store
            .mutate::<Note, _, _>(collections::NOTES, move |notes| {
                let note = notes.iter_mut().find(|n| n.id == id)?;
                note.title = new.title;
                note.category = category;
                note.content = new.content;
                note.last_modified = Utc::now();
                Some(note.clone())
            })
            .await
    }

    pub async fn delete_note(&self, id: u64) -> Result<()> {
        self.store
            .mutate::<Note, _, _>(collections::NOTES, move |notes| {
                notes.retain(|n| n.id != id);
            })
            .await?;

        tracing::info!("Deleted note {}", id);
        Ok(())
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        self.store.load_or_default(collections::NOTES).await
    }

    /// Distinct categories with note counts, in first-seen order.
    pub async fn categories(&self) -> Result<Vec<(String, usize)>> {
        let notes = self.list_notes().await?;
        let mut categories: Vec<(String, usize)> = Vec::new();
        for note in &notes {
            match categories.iter_mut().find(|(c, _)| *c == note.category) {
                Some((_, count)) => *count += 1,
                None => categories.push((note.category.clone(), 1)),
            }
        }
        Ok(categories)
    }

    /// Notes narrowed by category and/or a case-insensitive query over
    /// title, content and category.
    pub async fn search_notes(&self, category: Option<&str>, query: &str) -> Result<Vec<Note>> {
        let notes = self.list_notes().await?;
        let narrowed: Vec<Note> = match category {
            None => notes,
            Some(c) => notes.into_iter().filter(|n| n.category == c).collect(),
        };

        let hits = analytics::filter_by_text(&narrowed, query, |n| {
            vec![n.title.clone(), n.content.clone(), n.category.clone()]
        });
        Ok(hits.into_iter().cloned().collect())
    }
}

fn random_note_color() -> String {
    NOTE_COLOR_PALETTE
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(NOTE_COLOR_PALETTE[0])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::create_test_pool;

    async fn create_test_service() -> NotesService {
        NotesService::new(Store::new(create_test_pool().await))
    }

    fn new_note(title: &str, category: &str, content: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            category: category.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_note_assigns_palette_color_and_default_category() {
        let service = create_test_service().await;

        let note = service
            .add_note(new_note("Ideas", "", "write more tests"))
            .await
            .unwrap();

        assert_eq!(note.category, "Uncategorized");
        assert!(NOTE_COLOR_PALETTE.contains(&note.color.as_str()));
        assert_eq!(note.created, note.last_modified);
    }

    #[tokio::test]
    async fn test_update_refreshes_last_modified_keeps_created() {
        let service = create_test_service().await;

        let note = service
            .add_note(new_note("Draft", "work", "v1"))
            .await
            .unwrap();

        let updated = service
            .update_note(note.id, new_note("Draft", "work", "v2"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.content, "v2");
        assert_eq!(updated.created, note.created);
        assert_eq!(updated.color, note.color);
        assert!(updated.last_modified >= note.last_modified);

        // Unknown id is a no-op
        assert!(service
            .update_note(999, new_note("x", "", "y"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_categories_first_seen_with_counts() {
        let service = create_test_service().await;

        service.add_note(new_note("a", "work", "1")).await.unwrap();
        service.add_note(new_note("b", "home", "2")).await.unwrap();
        service.add_note(new_note("c", "work", "3")).await.unwrap();

        let categories = service.categories().await.unwrap();
        assert_eq!(
            categories,
            vec![("work".to_string(), 2), ("home".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn test_search_by_category_and_text() {
        let service = create_test_service().await;

        service
            .add_note(new_note("Groceries", "home", "milk and eggs"))
            .await
            .unwrap();
        service
            .add_note(new_note("Retro notes", "work", "action items"))
            .await
            .unwrap();

        let home = service.search_notes(Some("home"), "").await.unwrap();
        assert_eq!(home.len(), 1);

        let milk = service.search_notes(None, "MILK").await.unwrap();
        assert_eq!(milk.len(), 1);
        assert_eq!(milk[0].title, "Groceries");

        // Category filter and query combine
        let none = service.search_notes(Some("work"), "milk").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_delete_note() {
        let service = create_test_service().await;

        let note = service.add_note(new_note("a", "", "b")).await.unwrap();
        service.delete_note(note.id).await.unwrap();
        assert!(service.list_notes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_empty_content() {
        let service = create_test_service().await;

        let result = service.add_note(new_note("Title", "", "  ")).await;
        assert!(result.unwrap_err().is_validation());
    }
}
