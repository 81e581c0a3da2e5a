//! Affected-item property processing.

use crate::batch;
use redline_record::{AffectedItem, ChangeControlledItem};
use redline_store::{Store, StoreResult};
use tracing::debug;

/// Write every declared item property onto the in-memory new records of the
/// selected affected items, then push all touched columns in one grouped
/// lock → bulk-update → unlock cycle.
pub fn process_affected_item_properties(
    store: &dyn Store,
    items: &mut [AffectedItem],
    indices: &[usize],
) -> StoreResult<()> {
    if indices.is_empty() {
        return Ok(());
    }

    let mut columns: Vec<String> = Vec::new();
    for &index in indices {
        let assignments: Vec<(String, String)> = items[index]
            .properties(store)?
            .iter()
            .map(|row| (row.property_name().to_string(), row.new_value().to_string()))
            .collect();

        let new_item = items[index]
            .new_item
            .get_mut()
            .expect("new item assigned before property processing");
        for (name, value) in assignments {
            new_item.set_property(&name, &value);
            if !columns.iter().any(|existing| existing == &name) {
                columns.push(name);
            }
        }
    }
    debug!(columns = columns.len(), items = indices.len(), "pushing item properties");

    let views: Vec<&ChangeControlledItem> = indices
        .iter()
        .map(|&index| {
            items[index]
                .new_item
                .get()
                .expect("new item assigned before property processing")
        })
        .collect();

    batch::lock_all(store, &views)?;
    let column_names: Vec<&str> = columns.iter().map(String::as_str).collect();
    batch::apply_update(store, &views, &column_names)?;
    batch::unlock_all(store, &views)
}
