#![no_main]

use haven::resources::{MemorySource, format_resource_block};
use haven::{ResourceCatalog, ResourceItem, ResourceKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    let mut source = MemorySource::new();
    for kind in ResourceKind::ALL {
        source = source.with(kind, json);
    }
    let (catalog, report) = ResourceCatalog::load(&source);
    assert_eq!(report.kinds.len(), ResourceKind::ALL.len());

    // Lookups never come back empty, loaded or not.
    assert!(!catalog.helpline_info(Some(json)).is_empty());
    let items: Vec<ResourceItem> = catalog
        .helpline_info(None)
        .into_iter()
        .map(Into::into)
        .collect();
    assert!(!format_resource_block("helplines", &items).is_empty());
});
