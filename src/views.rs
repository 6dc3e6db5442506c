//! Text and markup fragments derived from the ordered release catalog.

use crate::asset_name::{ARCHIVE_SUFFIX, PlatformFamily};
use crate::model::{Asset, Release};
use crate::ordering::Catalog;
use serde::Serialize;

const BADGE_FALLBACK_COLOR: &str = "red";

const APPIMAGETOOL_URL: &str =
    "https://github.com/AppImage/AppImageKit/releases/download/continuous/";
const APPIMAGETOOL: &str = "appimagetool-x86_64.AppImage";

/// Badge color of a known architecture.
pub fn arch_color(arch: &str) -> Option<&'static str> {
    match arch {
        "aarch64" => Some("d8dee9"),
        "i686" => Some("81a1c1"),
        "x86_64" => Some("5e81ac"),
        _ => None,
    }
}

/// Comma separated list of release links, the last one joined by "and".
///
/// The catalog is never empty, so there is always a last entry.
pub fn release_list_html(catalog: &Catalog) -> String {
    let links: Vec<String> = catalog
        .releases()
        .iter()
        .map(|r| format!(r#"<a href="{}">{}</a>"#, r.detail_url, r.version))
        .collect();

    let text = match links.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        None => String::new(),
    };
    format!("The available Python versions are {}.", text)
}

/// shields.io badge linking to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub image_url: String,
    pub alt: String,
    pub link: String,
    pub color: String,
}

impl Badge {
    pub fn new(asset: &Asset) -> Self {
        let color = arch_color(&asset.arch).unwrap_or(BADGE_FALLBACK_COLOR);
        // shields.io reads a single underscore as a space.
        let arch = asset.arch.replace('_', "__");
        Self {
            image_url: format!(
                "https://img.shields.io/badge/{}-{}-{}",
                asset.abi(),
                arch,
                color
            ),
            alt: asset.arch.clone(),
            link: asset.download_url.clone(),
            color: color.to_string(),
        }
    }

    pub fn to_html(&self) -> String {
        format!(r#"<a href="{}">{}</a>"#, self.link, self.image_html())
    }

    /// Smaller variant for inline use in running text.
    pub fn to_compact_html(&self) -> String {
        format!(
            r#"<a href="{}"><span class="smaller-appimage-badge">{}</span></a>"#,
            self.link,
            self.image_html()
        )
    }

    fn image_html(&self) -> String {
        format!(r#"<img src="{}" alt="{}">"#, self.image_url, self.alt)
    }
}

/// Shell snippets for the installation section, one field per slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallExamples {
    pub basic_installation: String,
    pub full_version: String,
    pub python_tag: String,
    pub linux_tag: String,
    pub arch_tag: String,
    pub symlink: String,
    pub execution: String,
    pub site_packages: String,
    pub site_packages_target: String,
    pub user_isolation: String,
    pub venv: String,
    pub advanced_installation: String,
    pub repackaging: String,
}

impl InstallExamples {
    pub fn new(release: &Release, asset: &Asset) -> Self {
        let version = &release.version;
        let python = format!("python{}", version);
        let appdir = appdir_name(&asset.name);

        Self {
            basic_installation: format!(
                "wget {}\n\nchmod +x {}",
                wrap_download_url(&asset.download_url),
                asset.name
            ),
            full_version: release.full_version.clone().unwrap_or_default(),
            python_tag: asset.python_tag.clone(),
            linux_tag: asset.platform_family.manylinux_tag(),
            arch_tag: asset.arch.clone(),
            symlink: format!("ln -s {} {}", asset.name, python),
            execution: format!("./{}", python),
            site_packages: format!("./{} -m pip install numpy", python),
            site_packages_target: format!(
                "./{} -m pip install --target=$(pwd)/packages numpy",
                python
            ),
            user_isolation: format!("./{} -s", python),
            venv: format!("./{} -m venv /path/to/new/virtual/environment", python),
            advanced_installation: format!(
                "./{name} --appimage-extract\n\nmv squashfs-root {appdir}\n\nln -s {appdir}/AppRun {python}",
                name = asset.name,
            ),
            repackaging: format!(
                "wget {APPIMAGETOOL_URL}\\\n{APPIMAGETOOL}\n\nchmod +x {APPIMAGETOOL}\n\n./{APPIMAGETOOL} \\\n    {appdir} \\\n    {name}",
                name = asset.name,
            ),
        }
    }
}

/// `python3.10.9-...AppImage` -> `python3.10.9-...AppDir`
fn appdir_name(asset_name: &str) -> String {
    let stem = asset_name
        .strip_suffix(ARCHIVE_SUFFIX)
        .unwrap_or(asset_name);
    format!("{}.AppDir", stem)
}

/// Break a download URL after its `/download` path segment so that the
/// command fits a narrow code block. Other URLs stay on one line.
fn wrap_download_url(url: &str) -> String {
    const SEGMENT: &str = "/download/";
    match url.find(SEGMENT) {
        Some(pos) => {
            let split = pos + SEGMENT.len() - 1;
            format!("{}\\\n{}", &url[..split], &url[split..])
        }
        None => url.to_string(),
    }
}

/// Releases by manylinux family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityMatrix {
    /// Distinct families in first-seen order.
    pub families: Vec<PlatformFamily>,
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub version: String,
    /// One cell per family, each holding the badges of matching assets.
    pub cells: Vec<Vec<Badge>>,
}

impl CompatibilityMatrix {
    pub fn new(catalog: &Catalog) -> Self {
        let mut families: Vec<PlatformFamily> = Vec::new();
        for asset in catalog.releases().iter().flat_map(|r| &r.assets) {
            if !families.contains(&asset.platform_family) {
                families.push(asset.platform_family.clone());
            }
        }

        let rows = catalog
            .releases()
            .iter()
            .map(|release| MatrixRow {
                version: release.version.clone(),
                cells: families
                    .iter()
                    .map(|family| {
                        release
                            .assets
                            .iter()
                            .filter(|a| a.platform_family == *family)
                            .map(Badge::new)
                            .collect()
                    })
                    .collect(),
            })
            .collect();

        Self { families, rows }
    }

    pub fn to_html(&self) -> String {
        let header = self
            .families
            .iter()
            .map(|f| format!("<th>Manylinux {}</th>", f))
            .collect::<Vec<_>>()
            .join("\n");

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let cells = row
                    .cells
                    .iter()
                    .map(|badges| matrix_cell_html(badges))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("<tr><td>Python {}</td>\n{}\n</tr>", row.version, cells)
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<table class="appimages-summary-table"><thead><tr><th></th>
{}
</tr></thead>
<tbody>
{}
</tbody>
<caption>Summary of available Python AppImages.</caption>
</table>"#,
            header, rows
        )
    }
}

fn matrix_cell_html(badges: &[Badge]) -> String {
    if badges.is_empty() {
        return "<td>∅</td>".to_string();
    }
    let inner = badges
        .iter()
        .map(Badge::to_html)
        .collect::<Vec<_>>()
        .join("</td></tr><tr><td>");
    format!(
        r#"<td><table class="appimages-summary-table-inner"><tbody><tr><td>{}</td></tr></tbody></table></td>"#,
        inner
    )
}

/// Download tip for a detected host.
pub fn host_recommendation_html(host_arch: &str, asset: &Asset) -> String {
    format!(
        "According to your browser, your system is an {arch} Linux.\n\
         Therefore, we recommend that you download an {arch} AppImage\n\
         with Manylinux {family} compatibility. For\n\
         example, {badge}.",
        arch = host_arch,
        family = asset.platform_family,
        badge = Badge::new(asset).to_compact_html(),
    )
}
