use crate::file::ConfigSections;

/// Overlay `overlay` on top of `base`, section by section.
/// Keys present in both take `overlay`'s value; everything else is kept.
/// Sections keep the order in which they were first seen.
pub fn merge_sections(mut base: ConfigSections, overlay: ConfigSections) -> ConfigSections {
    for (section, key, value) in overlay.entries() {
        base.insert(section, key, value);
    }
    base
}
