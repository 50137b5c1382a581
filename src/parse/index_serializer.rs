use crate::model::collection::ListCollection;
use crate::parse::{
    FIELD_SEPARATOR, FormatError, IndexFile, IndexRecord, LINE_SEPARATOR, check_list_name,
    check_skylink,
};

/// Serialize a save file: the current index, then one `name<FF>skylink`
/// line per list. No trailing newline.
pub fn serialize_index(index: &IndexFile) -> Result<String, FormatError> {
    let mut output = index.current.to_string();
    for record in &index.records {
        check_list_name(&record.name)?;
        check_skylink(&record.skylink)?;
        output.push(LINE_SEPARATOR);
        output.push_str(&record.name);
        output.push(FIELD_SEPARATOR);
        output.push_str(&record.skylink);
    }
    Ok(output)
}

/// Snapshot the name/skylink pairs of a collection, in order.
pub fn index_of(collection: &ListCollection) -> IndexFile {
    IndexFile {
        current: collection.current_index().unwrap_or(0),
        records: collection
            .lists()
            .iter()
            .map(|l| IndexRecord::new(l.name.clone(), l.skylink.clone()))
            .collect(),
    }
}
