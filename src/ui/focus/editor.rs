// SPDX-License-Identifier: MPL-2.0
//! Editable details of the focused asset: tags, notes, gallery keyword and
//! category.
//!
//! The draft keeps the values last read from the snapshot next to the
//! edited ones, so a refresh can bring in saved values without discarding
//! what the user is still typing.

use crate::domain::asset::{AssetRecord, Category, TagSet};
use std::fmt;

/// Identifies which text field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    Tags,
    Notes,
    GalleryKeyword,
}

impl MetadataField {
    pub const ALL: [MetadataField; 3] = [
        MetadataField::Tags,
        MetadataField::Notes,
        MetadataField::GalleryKeyword,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MetadataField::Tags => "Tags",
            MetadataField::Notes => "Notes",
            MetadataField::GalleryKeyword => "Gallery keyword",
        }
    }

    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            MetadataField::Tags => "comma, separated",
            MetadataField::Notes => "",
            MetadataField::GalleryKeyword => "defaults to the file name",
        }
    }
}

/// Text values of the editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditableMetadata {
    pub tags: String,
    pub notes: String,
    pub gallery_keyword: String,
}

impl EditableMetadata {
    #[must_use]
    pub fn from_record(record: &AssetRecord) -> Self {
        Self {
            tags: record.tags.iter().collect::<Vec<_>>().join(", "),
            notes: record.notes.clone(),
            gallery_keyword: record.custom_gallery_keyword.clone().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn value(&self, field: MetadataField) -> &str {
        match field {
            MetadataField::Tags => &self.tags,
            MetadataField::Notes => &self.notes,
            MetadataField::GalleryKeyword => &self.gallery_keyword,
        }
    }

    fn value_mut(&mut self, field: MetadataField) -> &mut String {
        match field {
            MetadataField::Tags => &mut self.tags,
            MetadataField::Notes => &mut self.notes,
            MetadataField::GalleryKeyword => &mut self.gallery_keyword,
        }
    }
}

/// Parsed values handed to the metadata store on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEdits {
    pub tags: TagSet,
    pub notes: String,
    /// Empty clears the keyword.
    pub gallery_keyword: String,
}

/// Edit state for the focused asset.
#[derive(Debug, Clone, Default)]
pub struct MetadataEditorState {
    edited: EditableMetadata,
    original: EditableMetadata,
}

impl MetadataEditorState {
    #[must_use]
    pub fn from_record(record: &AssetRecord) -> Self {
        let values = EditableMetadata::from_record(record);
        Self {
            edited: values.clone(),
            original: values,
        }
    }

    #[must_use]
    pub fn edited(&self) -> &EditableMetadata {
        &self.edited
    }

    pub fn set_field(&mut self, field: MetadataField, value: String) {
        *self.edited.value_mut(field) = value;
    }

    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.edited != self.original
    }

    /// Takes the record's stored values as the new baseline. Fields the user
    /// has not touched follow the record; edited fields keep their text.
    pub fn rebase(&mut self, record: &AssetRecord) {
        let stored = EditableMetadata::from_record(record);
        for field in MetadataField::ALL {
            if self.edited.value(field) == self.original.value(field) {
                *self.edited.value_mut(field) = stored.value(field).to_string();
            }
        }
        self.original = stored;
    }

    /// The parsed edits, or `None` when nothing changed.
    #[must_use]
    pub fn pending_edits(&self) -> Option<MetadataEdits> {
        self.has_changes().then(|| MetadataEdits {
            tags: TagSet::from_csv(&self.edited.tags),
            notes: self.edited.notes.trim_end().to_string(),
            gallery_keyword: self.edited.gallery_keyword.trim().to_string(),
        })
    }
}

/// Entry of the category picker. `Automatic` hands the asset back to
/// size and extension based categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryChoice {
    Automatic,
    Manual(Category),
}

impl CategoryChoice {
    pub const ALL: [CategoryChoice; 7] = [
        CategoryChoice::Automatic,
        CategoryChoice::Manual(Category::Lora),
        CategoryChoice::Manual(Category::Checkpoint),
        CategoryChoice::Manual(Category::Video),
        CategoryChoice::Manual(Category::Images),
        CategoryChoice::Manual(Category::EvaluationGrid),
        CategoryChoice::Manual(Category::Misc),
    ];

    /// Picker entry reflecting the record's current category.
    #[must_use]
    pub fn of(record: &AssetRecord) -> Self {
        match record.category {
            Some(category) if record.is_category_manual => CategoryChoice::Manual(category),
            _ => CategoryChoice::Automatic,
        }
    }

    #[must_use]
    pub fn category(self) -> Option<Category> {
        match self {
            CategoryChoice::Automatic => None,
            CategoryChoice::Manual(category) => Some(category),
        }
    }
}

impl fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryChoice::Automatic => f.write_str("automatic"),
            CategoryChoice::Manual(category) => f.write_str(category.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::file;

    fn tagged() -> AssetRecord {
        let mut record = file("/m/knight.safetensors");
        record.tags = TagSet::from_csv("style,anime");
        record.notes = "trained on v2".to_string();
        record.custom_gallery_keyword = Some("knight".to_string());
        record
    }

    #[test]
    fn draft_starts_from_record_values() {
        let editor = MetadataEditorState::from_record(&tagged());
        assert_eq!(editor.edited().tags, "anime, style");
        assert_eq!(editor.edited().notes, "trained on v2");
        assert_eq!(editor.edited().gallery_keyword, "knight");
        assert!(!editor.has_changes());
        assert_eq!(editor.pending_edits(), None);
    }

    #[test]
    fn edits_are_parsed_for_saving() {
        let mut editor = MetadataEditorState::from_record(&tagged());
        editor.set_field(MetadataField::Tags, "Anime, , portrait".to_string());
        editor.set_field(MetadataField::GalleryKeyword, "  ".to_string());

        let edits = editor.pending_edits().expect("changed");
        assert_eq!(edits.tags.to_csv(), "anime,portrait");
        assert_eq!(edits.notes, "trained on v2");
        assert_eq!(edits.gallery_keyword, "");
    }

    #[test]
    fn rebase_keeps_fields_still_being_edited() {
        let mut editor = MetadataEditorState::from_record(&tagged());
        editor.set_field(MetadataField::Notes, "draft".to_string());

        let mut saved = tagged();
        saved.tags = TagSet::from_csv("style");
        saved.notes = "from disk".to_string();
        editor.rebase(&saved);

        assert_eq!(editor.edited().tags, "style");
        assert_eq!(editor.edited().notes, "draft");
        assert!(editor.has_changes());
    }

    #[test]
    fn category_choice_reflects_manual_flag() {
        let mut record = file("/m/a.safetensors");
        record.category = Some(Category::Lora);
        assert_eq!(CategoryChoice::of(&record), CategoryChoice::Automatic);

        record.is_category_manual = true;
        assert_eq!(
            CategoryChoice::of(&record),
            CategoryChoice::Manual(Category::Lora)
        );
        assert_eq!(CategoryChoice::Automatic.category(), None);
        assert_eq!(CategoryChoice::Manual(Category::Misc).to_string(), "misc");
    }
}
