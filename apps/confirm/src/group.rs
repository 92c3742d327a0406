use serde::Serialize;

use crate::entry::{Entry, EntryId};
use crate::errors::FormError;
use crate::schema::EntryKind;

/// What a remove request did to the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Removal {
    Removed,
    /// The entry was the last one; its values were cleared instead.
    Cleared,
}

/// An ordered, never-empty list of entries of one kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepeatableFieldGroup {
    kind: EntryKind,
    entries: Vec<Entry>,
}

impl RepeatableFieldGroup {
    /// A group holding a single blank entry.
    pub fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            entries: vec![Entry::blank(kind)],
        }
    }

    /// Builds a group from prefilled entries, falling back to one blank entry.
    /// Entries of another kind are dropped.
    pub fn from_entries(kind: EntryKind, entries: Vec<Entry>) -> Self {
        let entries: Vec<Entry> = entries.into_iter().filter(|e| e.kind == kind).collect();
        if entries.is_empty() {
            Self::new(kind)
        } else {
            Self { kind, entries }
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: a group keeps at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Appends a blank entry and returns its id.
    pub fn add(&mut self) -> EntryId {
        let entry = Entry::blank(self.kind);
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Removes `id`, or clears it in place when it is the only entry left.
    pub fn remove(&mut self, id: EntryId) -> Result<Removal, FormError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(FormError::UnknownEntry {
                kind: self.kind,
                entry: id,
            })?;

        if self.entries.len() > 1 {
            self.entries.remove(idx);
            Ok(Removal::Removed)
        } else {
            self.entries[idx].clear();
            Ok(Removal::Cleared)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_group_has_one_blank_entry() {
        for kind in EntryKind::ALL {
            let group = RepeatableFieldGroup::new(kind);
            assert_eq!(group.len(), 1);
            assert!(group.entries()[0].is_blank());
        }
    }

    #[test]
    fn test_remove_sole_entry_clears_instead() {
        for kind in EntryKind::ALL {
            let mut group = RepeatableFieldGroup::new(kind);
            let id = group.entries()[0].id;
            for spec in kind.fields() {
                group.get_mut(id).expect("entry").set(spec.name, "filled");
            }

            assert_eq!(group.remove(id), Ok(Removal::Cleared));
            assert_eq!(group.len(), 1, "{kind:?} group must keep one entry");
            assert_eq!(group.entries()[0].id, id);
            assert!(group.entries()[0].is_blank());
        }
    }

    #[test]
    fn test_remove_from_many_drops_only_target() {
        for kind in EntryKind::ALL {
            let field = kind.fields()[0].name;
            let mut group = RepeatableFieldGroup::new(kind);
            let first = group.entries()[0].id;
            let second = group.add();
            let third = group.add();
            group.get_mut(first).expect("first").set(field, "kept one");
            group.get_mut(second).expect("second").set(field, "dropped");
            group.get_mut(third).expect("third").set(field, "kept three");

            assert_eq!(group.remove(second), Ok(Removal::Removed), "{kind:?}");
            assert_eq!(group.len(), 2, "{kind:?} group should shrink by one");
            assert!(group.get(second).is_none(), "{kind:?} target still present");
            assert_eq!(group.get(first).and_then(|e| e.get(field)), Some("kept one"));
            assert_eq!(group.get(third).and_then(|e| e.get(field)), Some("kept three"));
        }
    }

    #[test]
    fn test_remove_unknown_entry_is_error() {
        let mut group = RepeatableFieldGroup::new(EntryKind::Education);
        group.add();
        let stranger = EntryId::new();
        assert!(matches!(
            group.remove(stranger),
            Err(FormError::UnknownEntry { .. })
        ));
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn test_from_entries_falls_back_to_blank() {
        let group = RepeatableFieldGroup::from_entries(EntryKind::Experience, vec![]);
        assert_eq!(group.len(), 1);

        let stray = vec![Entry::blank(EntryKind::Skill)];
        let group = RepeatableFieldGroup::from_entries(EntryKind::Experience, stray);
        assert_eq!(group.len(), 1);
        assert_eq!(group.entries()[0].kind, EntryKind::Experience);
    }

    #[test]
    fn test_add_appends_at_end() {
        let mut group = RepeatableFieldGroup::new(EntryKind::Certification);
        let id = group.add();
        assert_eq!(group.entries().last().map(|e| e.id), Some(id));
    }
}
