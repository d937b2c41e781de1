use super::*;

/// Write a class record under its id key and its name uniqueness key.
pub(crate) fn write_class<S: HasStateApi>(state: &mut S, class: &Class) -> LedgerResult<()> {
    write_value(state, &class_key(&class.id), class)?;
    write_value(state, &class_name_key(&class.name), &class.id)
}

pub(crate) fn read_class<S: HasStateApi>(state: &S, id: &str) -> LedgerResult<Option<Class>> {
    read_value(state, &class_key(id))
}

/// Classes in ascending id key order.
pub(crate) fn scan_classes<S: HasStateApi>(
    state: &S,
    page: &PageRequest,
) -> LedgerResult<Paged<Class>> {
    scan_prefix(state, &class_key(""), page, |_, entry| {
        Ok(Class::deserial(entry)?)
    })
}
