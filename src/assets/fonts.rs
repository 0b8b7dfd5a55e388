use std::path::Path;
use std::sync::Arc;

use crate::config::FontConfig;

/// Read-only font database shared by every render of a compositor.
#[derive(Clone, Debug)]
pub struct FontBook {
    db: Arc<usvg::fontdb::Database>,
}

impl FontBook {
    /// Build the database described by `cfg`.
    ///
    /// Unreadable directories and files are skipped; a host without any fonts yields an empty
    /// book, and text then renders nothing rather than failing.
    pub fn from_config(cfg: &FontConfig) -> Self {
        let mut db = usvg::fontdb::Database::new();
        if cfg.load_system_fonts {
            db.load_system_fonts();
        }
        for dir in &cfg.font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        if let Some(family) = &cfg.sans_serif_family {
            db.set_sans_serif_family(family.clone());
        }
        tracing::debug!(faces = db.len(), "font database ready");
        Self { db: Arc::new(db) }
    }

    /// Build a database from in-memory font files only.
    pub fn from_font_data(fonts: impl IntoIterator<Item = Vec<u8>>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        for bytes in fonts {
            db.load_font_data(bytes);
        }
        Self { db: Arc::new(db) }
    }

    /// Number of loaded font faces.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Return `true` when no font face is available.
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Return `true` when some face declares `family` (case-insensitive).
    pub fn has_family(&self, family: &str) -> bool {
        self.db.faces().any(|f| {
            f.families
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(family))
        })
    }

    pub(crate) fn database(&self) -> Arc<usvg::fontdb::Database> {
        Arc::clone(&self.db)
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable, skipping");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to load font file");
        }
    }
}

/// Font resolver that never gives up: requested families first, then the generic families, then
/// any face at all.
pub(crate) fn fallback_font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families: Vec<_> = font.families().iter().map(fontdb_family).collect();
            let requested = families.len();
            families.extend(FALLBACK_FAMILIES);

            if let Some(id) = fontdb.query(&query_for(font, &families[..requested])) {
                return Some(id);
            }

            tracing::debug!(
                requested = ?font.families(),
                "requested font family unavailable, substituting"
            );
            fontdb
                .query(&query_for(font, &families))
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

const FALLBACK_FAMILIES: [usvg::fontdb::Family<'static>; 3] = [
    usvg::fontdb::Family::SansSerif,
    usvg::fontdb::Family::Serif,
    usvg::fontdb::Family::Monospace,
];

fn query_for<'a>(
    font: &usvg::Font,
    families: &'a [usvg::fontdb::Family<'a>],
) -> usvg::fontdb::Query<'a> {
    usvg::fontdb::Query {
        families,
        weight: usvg::fontdb::Weight(font.weight()),
        stretch: fontdb_stretch(font.stretch()),
        style: fontdb_style(font.style()),
    }
}

fn fontdb_family(family: &usvg::FontFamily) -> usvg::fontdb::Family<'_> {
    use usvg::fontdb::Family;
    match family {
        usvg::FontFamily::Serif => Family::Serif,
        usvg::FontFamily::SansSerif => Family::SansSerif,
        usvg::FontFamily::Cursive => Family::Cursive,
        usvg::FontFamily::Fantasy => Family::Fantasy,
        usvg::FontFamily::Monospace => Family::Monospace,
        usvg::FontFamily::Named(name) => Family::Name(name.as_str()),
    }
}

fn fontdb_stretch(stretch: usvg::FontStretch) -> usvg::fontdb::Stretch {
    use usvg::fontdb::Stretch;
    match stretch {
        usvg::FontStretch::UltraCondensed => Stretch::UltraCondensed,
        usvg::FontStretch::ExtraCondensed => Stretch::ExtraCondensed,
        usvg::FontStretch::Condensed => Stretch::Condensed,
        usvg::FontStretch::SemiCondensed => Stretch::SemiCondensed,
        usvg::FontStretch::Normal => Stretch::Normal,
        usvg::FontStretch::SemiExpanded => Stretch::SemiExpanded,
        usvg::FontStretch::Expanded => Stretch::Expanded,
        usvg::FontStretch::ExtraExpanded => Stretch::ExtraExpanded,
        usvg::FontStretch::UltraExpanded => Stretch::UltraExpanded,
    }
}

fn fontdb_style(style: usvg::FontStyle) -> usvg::fontdb::Style {
    match style {
        usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
        usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
        usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
