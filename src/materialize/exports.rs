//! Textual export detection for origin modules.
//!
//! Only the shapes the wrappers care about are recognized:
//! `export const NAME`, `export function NAME`, `export async function NAME`.

use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::LazyLock;

/// Exports a wrapper forwards when the origin defines them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportName {
    Metadata,
    GenerateMetadata,
    Viewport,
    GenerateViewport,
    GenerateStaticParams,
    GenerateSitemaps,
    GenerateImageMetadata,
}

impl ExportName {
    pub const ALL: [Self; 7] = [
        Self::Metadata,
        Self::GenerateMetadata,
        Self::Viewport,
        Self::GenerateViewport,
        Self::GenerateStaticParams,
        Self::GenerateSitemaps,
        Self::GenerateImageMetadata,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::GenerateMetadata => "generateMetadata",
            Self::Viewport => "viewport",
            Self::GenerateViewport => "generateViewport",
            Self::GenerateStaticParams => "generateStaticParams",
            Self::GenerateSitemaps => "generateSitemaps",
            Self::GenerateImageMetadata => "generateImageMetadata",
        }
    }

    /// Plain objects are re-exported; functions are wrapped.
    pub const fn is_object(self) -> bool {
        matches!(self, Self::Metadata | Self::Viewport)
    }
}

/// Route segment config constants copied verbatim into wrappers.
pub const SEGMENT_CONFIG_KEYS: [&str; 11] = [
    "experimental_ppr",
    "dynamic",
    "dynamicParams",
    "revalidate",
    "fetchCache",
    "runtime",
    "preferredRegion",
    "maxDuration",
    "alt",
    "size",
    "contentType",
];

static EXPORT_PATTERNS: LazyLock<Vec<(ExportName, Regex)>> = LazyLock::new(|| {
    ExportName::ALL
        .iter()
        .map(|&name| {
            let pattern = if name.is_object() {
                format!(r"export const {}\b", name.as_str())
            } else {
                format!(r"export ((async )?function|const) {}\b", name.as_str())
            };
            (name, Regex::new(&pattern).unwrap())
        })
        .collect()
});

static SEGMENT_CONFIG_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SEGMENT_CONFIG_KEYS
        .iter()
        .map(|key| match *key {
            // object literal spanning lines
            "size" => Regex::new(r"export const size = \{[^}]*\};?").unwrap(),
            key => Regex::new(&format!("export const {key} = .*")).unwrap(),
        })
        .collect()
});

/// What an origin module exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginExports {
    names: FxHashSet<ExportName>,
    /// Matched segment config declarations, in key order.
    pub segment_config: Vec<String>,
}

impl OriginExports {
    pub fn has(&self, name: ExportName) -> bool {
        self.names.contains(&name)
    }
}

/// Scan module source for forwarded exports.
pub fn detect_exports(source: &str) -> OriginExports {
    let names = EXPORT_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(source))
        .map(|(name, _)| *name)
        .collect();
    let segment_config = SEGMENT_CONFIG_PATTERNS
        .iter()
        .filter_map(|re| re.find(source))
        .map(|m| m.as_str().trim_end().to_string())
        .collect();
    OriginExports {
        names,
        segment_config,
    }
}

/// A layout rendering the document element.
pub fn is_root_layout(source: &str) -> bool {
    source.contains("<html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_functions_and_objects() {
        let exports = detect_exports(
            "export const metadata = {};\nexport async function generateMetadata() {}\nexport const generateStaticParams = () => [];\n",
        );
        assert!(exports.has(ExportName::Metadata));
        assert!(exports.has(ExportName::GenerateMetadata));
        assert!(exports.has(ExportName::GenerateStaticParams));
        assert!(!exports.has(ExportName::Viewport));
        assert!(exports.segment_config.is_empty());
    }

    #[test]
    fn test_name_prefixes_do_not_match() {
        let exports = detect_exports("export const metadataBase = 1;\nexport function generateMetadataFor() {}\n");
        assert!(!exports.has(ExportName::Metadata));
        assert!(!exports.has(ExportName::GenerateMetadata));
    }

    #[test]
    fn test_segment_config_in_key_order() {
        let exports = detect_exports(
            "export const size = {\n  width: 32,\n  height: 32,\n};\nexport const contentType = \"image/png\";\nexport const revalidate = 60;   \nexport const dynamicParams = true;\n",
        );
        assert_eq!(
            exports.segment_config,
            vec![
                "export const dynamicParams = true;",
                "export const revalidate = 60;",
                "export const size = {\n  width: 32,\n  height: 32,\n};",
                "export const contentType = \"image/png\";",
            ]
        );
    }

    #[test]
    fn test_root_layout() {
        assert!(is_root_layout("return <html lang={locale}>"));
        assert!(!is_root_layout("return <main>{children}</main>"));
    }
}
