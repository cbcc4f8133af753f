use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IsochroneRecord {
    pub id: u32,
    pub geojson: String,
}

/// Append-only list of fetched isochrones. Ids are assigned on insertion
/// and equal the list length after the push. Duplicates are kept.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IsochroneList {
    records: Vec<IsochroneRecord>,
}

impl IsochroneList {
    pub fn push(&mut self, geojson: String) -> &IsochroneRecord {
        let id = self.records.len() as u32 + 1;
        self.records.push(IsochroneRecord { id, geojson });
        &self.records[self.records.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&IsochroneRecord> {
        self.records.last()
    }

    pub fn as_slice(&self) -> &[IsochroneRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &IsochroneRecord> {
        self.records.iter()
    }
}

#[test]
fn test_ids_follow_length() {
    let mut list = IsochroneList::default();
    assert!(list.is_empty());

    assert_eq!(list.push("{}".into()).id, 1);
    assert_eq!(list.push("{}".into()).id, 2);
    assert_eq!(list.push("{\"a\":1}".into()).id, 3);

    let ids: Vec<u32> = list.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(list.len(), 3);
    assert_eq!(list.last().map(|r| r.geojson.as_str()), Some("{\"a\":1}"));
}
