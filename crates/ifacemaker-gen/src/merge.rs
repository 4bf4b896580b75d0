//! Combining scan results for one type gathered from several files.

use ifacemaker_core::model::StructData;

/// Concatenate methods and embedded members in input order; union imports,
/// keeping the first occurrence of each line.
pub fn merge_struct_data<I>(parts: I) -> StructData
where
    I: IntoIterator<Item = StructData>,
{
    let mut merged = StructData::default();
    for part in parts {
        merged.embedded.extend(part.embedded);
        merged.methods.extend(part.methods);
        for import in part.imports {
            if !merged.imports.contains(&import) {
                merged.imports.push(import);
            }
        }
    }
    merged
}
