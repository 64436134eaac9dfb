//! Inventory records: freezers hold boxes, boxes hold slots.
//!
//! Ids are assigned by whatever stores the records; `0` means "not stored yet".

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Freezer {
    pub id: u32,
    pub name: String,
}

impl Freezer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageBox {
    pub id: u32,
    pub name: String,
    pub freezer_id: u32,
}

impl StorageBox {
    pub fn new(name: impl Into<String>, freezer_id: u32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            freezer_id,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Slot {
    pub id: u32,
    pub name: String,
    pub box_id: u32,
    pub freezer_id: u32,
    pub kind: String,
    pub date: String,
    pub description: String,
}

/// The editable part of a [`Slot`], as collected by [`crate::form::SlotForm`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotDraft {
    pub name: String,
    pub kind: String,
    pub date: String,
    pub description: String,
}

impl SlotDraft {
    pub fn into_slot(self, storage_box: &StorageBox) -> Slot {
        Slot {
            id: 0,
            name: self.name,
            box_id: storage_box.id,
            freezer_id: storage_box.freezer_id,
            kind: self.kind,
            date: self.date,
            description: self.description,
        }
    }
}
