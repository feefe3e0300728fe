//! Shared test fixture: a small but complete origin route tree.
//!
//! ```text
//! src/_app/
//! ├── (static)/
//! │   ├── about/            i18n.json  en: about-the-site, fi: tietoa-sivustosta
//! │   ├── layout.jsx
//! │   └── privacy-policy/   page.en.mdx, page.fi.mdx, i18n.ts  fi: tietosuojaseloste
//! ├── [...catchAll]/
//! ├── _components/          private, never discovered
//! ├── feed/                 i18n.toml  fi: syote
//! │   └── @modal/(..)images/[id]/      i18n.js  fi: kuvat
//! ├── images/               i18n.json  fi: kuvat
//! │   └── [id]/
//! └── layout.tsx, page.tsx, error.tsx, sitemap.ts, icon.tsx, opengraph-image.jpg, ...
//! ```

use std::fs;
use std::path::Path;

/// Bytes of the fixture's static `opengraph-image.jpg`.
pub const OG_IMAGE_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

/// Write the fixture under `root/src/_app`.
pub fn write_origin_tree(root: &Path) {
    let app = root.join("src/_app");
    let files: &[(&str, &str)] = &[
        (
            "(static)/about/i18n.json",
            r#"{ "en": "about-the-site", "fi": "tietoa-sivustosta" }"#,
        ),
        (
            "(static)/about/page.jsx",
            "export default function About() {\n  return <h1>About</h1>;\n}\n",
        ),
        (
            "(static)/about/template.jsx",
            "export default function Template({ children }) {\n  return <div>{children}</div>;\n}\n",
        ),
        (
            "(static)/layout.jsx",
            "export default function StaticLayout({ children }) {\n  return <main>{children}</main>;\n}\n",
        ),
        (
            "(static)/privacy-policy/i18n.ts",
            "export default {\n  fi: \"tietosuojaseloste\",\n};\n",
        ),
        ("(static)/privacy-policy/page.en.mdx", "# Privacy policy\n"),
        ("(static)/privacy-policy/page.fi.mdx", "# Tietosuojaseloste\n"),
        (
            "[...catchAll]/not-found.jsx",
            "export default function NotFound() {\n  return <h1>Not found</h1>;\n}\n",
        ),
        (
            "[...catchAll]/page.jsx",
            "import { notFound } from \"next/navigation\";\n\nexport default function CatchAll() {\n  notFound();\n}\n",
        ),
        (
            "_components/Button.tsx",
            "export function Button() {\n  return <button />;\n}\n",
        ),
        (
            "_components/page.tsx",
            "export default function Hidden() {\n  return null;\n}\n",
        ),
        (
            "error.tsx",
            "\"use client\";\n\nexport default function Error({ reset }) {\n  return <button onClick={reset}>Retry</button>;\n}\n",
        ),
        ("feed/i18n.toml", "fi = \"syote\"\n"),
        (
            "feed/loading.tsx",
            "export default function Loading() {\n  return <p>Loading...</p>;\n}\n",
        ),
        (
            "feed/page.tsx",
            "export const dynamic = \"force-dynamic\";\n\nexport default function Feed() {\n  return <h1>Feed</h1>;\n}\n",
        ),
        (
            "feed/@modal/default.tsx",
            "export default function Default() {\n  return null;\n}\n",
        ),
        (
            "feed/@modal/(..)images/i18n.js",
            "export default { fi: \"kuvat\" };\n",
        ),
        (
            "feed/@modal/(..)images/[id]/not-found.tsx",
            "export default function NotFound() {\n  return null;\n}\n",
        ),
        (
            "feed/@modal/(..)images/[id]/page.tsx",
            "export default async function ImageModal({ params }) {\n  const { id } = await params;\n  return <dialog>{id}</dialog>;\n}\n",
        ),
        ("forbidden.tsx", "export default function Forbidden() {\n  return null;\n}\n"),
        (
            "icon.tsx",
            "export const size = {\n  width: 32,\n  height: 32,\n};\nexport const contentType = \"image/png\";\n\nexport default function Icon() {\n  return null;\n}\n",
        ),
        ("images/i18n.json", r#"{ "fi": "kuvat" }"#),
        (
            "images/page.tsx",
            "export default function Images() {\n  return <h1>Images</h1>;\n}\n",
        ),
        (
            "images/[id]/not-found.tsx",
            "export default function NotFound() {\n  return null;\n}\n",
        ),
        (
            "images/[id]/page.tsx",
            "export const revalidate = 60;\n\nexport async function generateMetadata({ params }) {\n  return { title: (await params).id };\n}\n\nexport function generateStaticParams() {\n  return [{ id: \"1\" }];\n}\n\nexport default async function Image({ params }) {\n  return <h1>{(await params).id}</h1>;\n}\n",
        ),
        (
            "layout.tsx",
            "export const viewport = { themeColor: \"black\" };\n\nexport default function RootLayout({ children, locale }) {\n  return (\n    <html lang={locale}>\n      <body>{children}</body>\n    </html>\n  );\n}\n",
        ),
        ("opengraph-image.alt.txt", "Globe\n"),
        (
            "page.tsx",
            "export const metadata = { title: \"Home\" };\n\nexport default function Home() {\n  return <h1>Home</h1>;\n}\n",
        ),
        (
            "sitemap.ts",
            "export default function sitemap({ locale }) {\n  return [{ url: `https://example.com/${locale}` }];\n}\n",
        ),
        (
            "unauthorized.tsx",
            "export default function Unauthorized() {\n  return null;\n}\n",
        ),
        ("utils.ts", "export const noop = () => {};\n"),
    ];

    for (path, content) in files {
        let path = app.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    fs::write(app.join("opengraph-image.jpg"), OG_IMAGE_BYTES).unwrap();
}
