//! Category aggregation

use arfni_core::types::{CategoryCatalog, CategoryStats, CategorySummary, RegistryEntry};

/// Count entries per catalog category.
///
/// Every catalog key appears in the result, in catalog order, even when no
/// entry uses it. Entries whose category is not in the catalog are not
/// counted.
pub fn aggregate_categories(catalog: &CategoryCatalog, entries: &[RegistryEntry]) -> CategoryStats {
    let mut stats = CategoryStats::new();

    for (key, info) in catalog.iter() {
        let count = entries.iter().filter(|e| e.category == key).count();
        stats.insert(
            key,
            CategorySummary {
                name: info.name.clone(),
                description: info.description.clone(),
                count,
            },
        );
    }

    stats
}
