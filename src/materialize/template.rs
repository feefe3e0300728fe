//! Wrapper module templates.
//!
//! Base templates and the passthrough sections appended to them use
//! `{{routeType}}`, `{{relativePath}}` and `{{locale}}` placeholders, filled
//! in by [`WrapperVars`].

use super::exports::{ExportName, OriginExports};
use crate::route::TemplateClass;
use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }

    pub const fn content(&self) -> &'static str {
        self.content
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

/// Variables of one wrapper file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperVars {
    /// Component name, e.g. `Page`, `NotFound`.
    pub route_type: String,
    /// Import specifier of the origin module.
    pub relative_path: String,
    pub locale: String,
}

impl TemplateVars for WrapperVars {
    fn apply(&self, content: &str) -> String {
        content
            .replace("{{routeType}}", &self.route_type)
            .replace("{{relativePath}}", &self.relative_path)
            .replace("{{locale}}", &self.locale)
    }
}

pub const COMPONENT: Template<WrapperVars> = Template::new(concat!(
    "/* eslint-disable */\n// @ts-nocheck\n\n",
    "import { setLocale } from \"next-globe-gen\";\n",
    "import Origin{{routeType}} from \"{{relativePath}}\";\n\n",
    "export default function {{routeType}}(props) {\n",
    "\tsetLocale(\"{{locale}}\");\n",
    "\treturn <Origin{{routeType}} {...props} locale=\"{{locale}}\" />;\n}",
));

pub const ROOT_LAYOUT: Template<WrapperVars> = Template::new(concat!(
    "/* eslint-disable */\n// @ts-nocheck\n\n",
    "import { setLocale } from \"next-globe-gen\";\n",
    "import { IntlProvider } from \"next-globe-gen/client\";\n",
    "import { clientMessages } from \"next-globe-gen/messages\";\n",
    "import { schema } from \"next-globe-gen/schema\";\n",
    "import Origin{{routeType}} from \"{{relativePath}}\";\n\n",
    "export default function {{routeType}}(props) {\n",
    "\tsetLocale(\"{{locale}}\");\n",
    "\treturn (\n",
    "\t\t<IntlProvider locale=\"{{locale}}\" schema={schema} messages={clientMessages[\"{{locale}}\"]}>\n",
    "\t\t\t<Origin{{routeType}} {...props} locale=\"{{locale}}\" />\n",
    "\t\t</IntlProvider>\n",
    "\t);\n}",
));

pub const CLIENT_ERROR: Template<WrapperVars> = Template::new(concat!(
    "/* eslint-disable */\n// @ts-nocheck\n\n",
    "\"use client\"\n\n",
    "import Origin{{routeType}} from \"{{relativePath}}\";\n\n",
    "export default function {{routeType}}(props) {\n",
    "\treturn <Origin{{routeType}} {...props} locale=\"{{locale}}\" />;\n}",
));

pub const FUNCTION: Template<WrapperVars> = Template::new(concat!(
    "/* eslint-disable */\n// @ts-nocheck\n\n",
    "import Origin{{routeType}} from \"{{relativePath}}\";\n\n",
    "export default function {{routeType}}(params) {\n",
    "\treturn Origin{{routeType}}({ ...params, locale: \"{{locale}}\" });\n}",
));

/// Everything that selects and extends a wrapper template.
pub struct WrapperSpec<'a> {
    pub class: TemplateClass,
    pub root_layout: bool,
    pub exports: &'a OriginExports,
    /// Route name to inject language alternates for; `None` disables injection.
    pub alternates_route: Option<&'a str>,
}

/// Render a wrapper module, or `None` for verbatim copies.
pub fn render_wrapper(spec: &WrapperSpec<'_>, vars: &WrapperVars) -> Option<String> {
    let base = match spec.class {
        TemplateClass::Copy => return None,
        TemplateClass::Component if spec.root_layout => ROOT_LAYOUT.render(vars),
        TemplateClass::Component => COMPONENT.render(vars),
        TemplateClass::PropLess => vars.apply(&without_props(COMPONENT.content())),
        TemplateClass::ClientError => CLIENT_ERROR.render(vars),
        TemplateClass::Function => FUNCTION.render(vars),
    };

    let exports = spec.exports;
    let mut extra = String::new();
    match spec.alternates_route {
        Some(route_name) => push_language_alternates(&mut extra, exports, route_name),
        None if exports.has(ExportName::GenerateMetadata) => {
            push_generate_fn(&mut extra, ExportName::GenerateMetadata)
        }
        None if exports.has(ExportName::Metadata) => push_re_export(&mut extra, ExportName::Metadata),
        None => {}
    }
    if exports.has(ExportName::Viewport) {
        push_re_export(&mut extra, ExportName::Viewport);
    }
    for name in [
        ExportName::GenerateViewport,
        ExportName::GenerateStaticParams,
        ExportName::GenerateSitemaps,
        ExportName::GenerateImageMetadata,
    ] {
        if exports.has(name) {
            push_generate_fn(&mut extra, name);
        }
    }
    if !exports.segment_config.is_empty() {
        extra.push_str("\n\n");
        extra.push_str(exports.segment_config.join("\n").trim());
    }

    Some(base + &vars.apply(&extra))
}

/// Drop the props parameter and spread from a component template.
fn without_props(template: &str) -> String {
    template
        .replacen(" {...props}", "", 1)
        .replacen("props", "", 1)
}

fn push_language_alternates(template: &mut String, exports: &OriginExports, route_name: &str) {
    let (import, metadata) = if exports.has(ExportName::GenerateMetadata) {
        (
            Some("generateMetadata as generateMetadataOrigin"),
            "await generateMetadataOrigin({ ...props, locale: \"{{locale}}\" }, parent)",
        )
    } else if exports.has(ExportName::Metadata) {
        (Some("metadata as metadataOrigin"), "metadataOrigin")
    } else {
        (None, "{}")
    };

    template.push_str("\n\nimport { withLanguageAlternates } from \"next-globe-gen\";");
    if let Some(import) = import {
        template.push_str(&format!("\nimport {{ {import} }} from \"{{{{relativePath}}}}\";"));
    }
    template.push_str("\n\nexport async function generateMetadata(props, parent) {");
    template.push_str("\n\tsetLocale(\"{{locale}}\");");
    template.push_str(&format!("\n\tconst metadata = {metadata};"));
    // JSON string syntax is a valid JS string literal
    let route_name = serde_json::Value::from(route_name).to_string();
    template.push_str(&format!(
        "\n\treturn withLanguageAlternates({route_name}, await props.params)(metadata);\n}}"
    ));
}

fn push_re_export(template: &mut String, name: ExportName) {
    template.push_str(&format!(
        "\n\nexport {{ {} }} from \"{{{{relativePath}}}}\";",
        name.as_str()
    ));
}

fn push_generate_fn(template: &mut String, name: ExportName) {
    let name = name.as_str();
    let parent = if name == "generateMetadata" { ", parent" } else { "" };
    template.push_str(&format!(
        "\n\nimport {{ {name} as {name}Origin }} from \"{{{{relativePath}}}}\";"
    ));
    template.push_str(&format!("\n\nexport function {name}(props{parent}) {{"));
    if matches!(name, "generateMetadata" | "generateViewport") {
        template.push_str("\n\tsetLocale(\"{{locale}}\");");
    }
    template.push_str(&format!(
        "\n\treturn {name}Origin({{ ...props, locale: \"{{{{locale}}}}\" }}{parent});\n}}"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materialize::exports::detect_exports;

    fn vars() -> WrapperVars {
        WrapperVars {
            route_type: "Page".into(),
            relative_path: "../_app/page".into(),
            locale: "en".into(),
        }
    }

    fn render(class: TemplateClass, source: &str, alternates_route: Option<&str>) -> String {
        let exports = detect_exports(source);
        let spec = WrapperSpec {
            class,
            root_layout: false,
            exports: &exports,
            alternates_route,
        };
        render_wrapper(&spec, &vars()).unwrap()
    }

    #[test]
    fn test_basic_page() {
        assert_eq!(
            render(TemplateClass::Component, "export default function P() {}", None),
            "/* eslint-disable */\n// @ts-nocheck\n\nimport { setLocale } from \"next-globe-gen\";\nimport OriginPage from \"../_app/page\";\n\nexport default function Page(props) {\n\tsetLocale(\"en\");\n\treturn <OriginPage {...props} locale=\"en\" />;\n}"
        );
    }

    #[test]
    fn test_root_layout() {
        let exports = OriginExports::default();
        let spec = WrapperSpec {
            class: TemplateClass::Component,
            root_layout: true,
            exports: &exports,
            alternates_route: None,
        };
        let vars = WrapperVars {
            route_type: "Layout".into(),
            relative_path: "../_app/layout".into(),
            locale: "en".into(),
        };
        let rendered = render_wrapper(&spec, &vars).unwrap();
        assert!(rendered.contains("import { schema } from \"next-globe-gen/schema\";\nimport OriginLayout from \"../_app/layout\";"));
        assert!(rendered.ends_with(
            "\t\t<IntlProvider locale=\"en\" schema={schema} messages={clientMessages[\"en\"]}>\n\t\t\t<OriginLayout {...props} locale=\"en\" />\n\t\t</IntlProvider>\n\t);\n}"
        ));
    }

    #[test]
    fn test_prop_less_component() {
        let vars = WrapperVars {
            route_type: "Loading".into(),
            relative_path: "../_app/props/loading".into(),
            locale: "fi".into(),
        };
        let exports = OriginExports::default();
        let spec = WrapperSpec {
            class: TemplateClass::PropLess,
            root_layout: false,
            exports: &exports,
            alternates_route: None,
        };
        let rendered = render_wrapper(&spec, &vars).unwrap();
        assert!(rendered.contains("import OriginLoading from \"../_app/props/loading\";"));
        assert!(rendered.contains("export default function Loading() {"));
        assert!(rendered.contains("return <OriginLoading locale=\"fi\" />;"));
    }

    #[test]
    fn test_client_error_has_no_locale_store() {
        let rendered = render(TemplateClass::ClientError, "", None);
        assert!(rendered.contains("\"use client\"\n\nimport OriginPage"));
        assert!(!rendered.contains("setLocale"));
    }

    #[test]
    fn test_function_wrapper() {
        let rendered = render(TemplateClass::Function, "", None);
        assert!(rendered.ends_with(
            "export default function Page(params) {\n\treturn OriginPage({ ...params, locale: \"en\" });\n}"
        ));
    }

    #[test]
    fn test_copy_renders_nothing() {
        let exports = OriginExports::default();
        let spec = WrapperSpec {
            class: TemplateClass::Copy,
            root_layout: false,
            exports: &exports,
            alternates_route: None,
        };
        assert_eq!(render_wrapper(&spec, &vars()), None);
    }

    #[test]
    fn test_generate_metadata_with_alternates() {
        let rendered = render(
            TemplateClass::Component,
            "export async function generateMetadata() {}",
            Some("/"),
        );
        assert!(rendered.ends_with(
            "\n\nimport { withLanguageAlternates } from \"next-globe-gen\";\nimport { generateMetadata as generateMetadataOrigin } from \"../_app/page\";\n\nexport async function generateMetadata(props, parent) {\n\tsetLocale(\"en\");\n\tconst metadata = await generateMetadataOrigin({ ...props, locale: \"en\" }, parent);\n\treturn withLanguageAlternates(\"/\", await props.params)(metadata);\n}"
        ));
    }

    #[test]
    fn test_alternates_without_origin_metadata() {
        let rendered = render(TemplateClass::Component, "", Some("/about"));
        assert!(rendered.contains("import { withLanguageAlternates } from \"next-globe-gen\";\n\nexport async"));
        assert!(rendered.contains("\tconst metadata = {};"));
        assert!(rendered.contains("withLanguageAlternates(\"/about\", await props.params)"));
    }

    #[test]
    fn test_alternates_route_name_is_escaped() {
        let rendered = render(TemplateClass::Component, "", Some(r#"/say "hi"\x"#));
        assert!(rendered.contains(r#"withLanguageAlternates("/say \"hi\"\\x", await props.params)"#));
    }

    #[test]
    fn test_static_metadata_with_alternates() {
        let rendered = render(TemplateClass::Component, "export const metadata = {};", Some("/"));
        assert!(rendered.contains("import { metadata as metadataOrigin } from \"../_app/page\";"));
        assert!(rendered.contains("\tconst metadata = metadataOrigin;"));
    }

    #[test]
    fn test_generate_metadata_without_alternates() {
        let rendered = render(
            TemplateClass::Component,
            "export async function generateMetadata() {}",
            None,
        );
        assert!(rendered.ends_with(
            "\n\nimport { generateMetadata as generateMetadataOrigin } from \"../_app/page\";\n\nexport function generateMetadata(props, parent) {\n\tsetLocale(\"en\");\n\treturn generateMetadataOrigin({ ...props, locale: \"en\" }, parent);\n}"
        ));
    }

    #[test]
    fn test_static_metadata_re_export() {
        let rendered = render(TemplateClass::Component, "export const metadata = {};", None);
        assert!(rendered.ends_with("\n\nexport { metadata } from \"../_app/page\";"));
    }

    #[test]
    fn test_passthrough_order() {
        let rendered = render(
            TemplateClass::Component,
            "export const revalidate = 60;\nexport function generateStaticParams() {}\nexport const viewport = {};\nexport function generateViewport() {}\n",
            None,
        );
        let viewport = rendered.find("export { viewport }").unwrap();
        let generate_viewport = rendered.find("export function generateViewport(props) {\n\tsetLocale").unwrap();
        let static_params = rendered
            .find("export function generateStaticParams(props) {\n\treturn generateStaticParamsOrigin")
            .unwrap();
        let segment = rendered.find("export const revalidate = 60;").unwrap();
        assert!(viewport < generate_viewport);
        assert!(generate_viewport < static_params);
        assert!(static_params < segment);
        assert!(rendered.ends_with("export const revalidate = 60;"));
    }
}
