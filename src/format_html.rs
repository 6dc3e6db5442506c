//! Standalone HTML documents around a page view.

use crate::page::PageView;
use crate::views::InstallExamples;
use chrono::{DateTime, Utc};

const STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; }
        h1 { color: #333; }
        a { color: #0366d6; text-decoration: none; }
        a:hover { text-decoration: underline; }
        pre { background: #f6f8fa; border-radius: 6px; padding: 12px; overflow-x: auto; }
        code { font-size: 0.9em; }
        small { color: #666; }
        .tip { padding: 12px 16px; margin: 20px 0; background: #f0fff4; border: 1px solid #28a745; border-radius: 6px; }
        .appimages-summary-table { border-collapse: collapse; margin: 20px 0; }
        .appimages-summary-table th, .appimages-summary-table > tbody > tr > td { border: 1px solid #e1e4e8; padding: 6px 10px; text-align: center; }
        .appimages-summary-table-inner td { border: none; padding: 2px; }
        .smaller-appimage-badge img { height: 1em; }
"#;

fn snippet(title: &str, code: &str) -> String {
    format!(
        "<h3>{}</h3>\n<pre><code class=\"language-bash\">{}</code></pre>",
        title, code
    )
}

fn format_examples_html(examples: &InstallExamples) -> String {
    let sections = [
        snippet("Download", &examples.basic_installation),
        format!(
            "<p>This AppImage ships Python <code>{}</code> ({}) for <code>{}</code> on <code>{}</code>.</p>",
            examples.full_version, examples.python_tag, examples.arch_tag, examples.linux_tag
        ),
        snippet("Symlink", &examples.symlink),
        format!(
            "<p>Run it with <code>{}</code>.</p>",
            examples.execution
        ),
        snippet("Installing site packages", &examples.site_packages),
        snippet("Installing into a custom target", &examples.site_packages_target),
        format!(
            "<p>Isolate it from the user site with <code>{}</code>.</p>",
            examples.user_isolation
        ),
        snippet("Virtual environment", &examples.venv),
        snippet("Extracting the AppImage", &examples.advanced_installation),
        snippet("Repackaging", &examples.repackaging),
    ];
    sections.join("\n")
}

/// Standalone HTML document for a page view.
pub fn format_page_html(page: &PageView, repo: &str, fetched_at: Option<DateTime<Utc>>) -> String {
    let fetch_info = fetched_at
        .map(|t| {
            format!(
                "<p><small>Release data fetched at: {}</small></p>",
                t.format("%Y-%m-%d %H:%M:%S UTC")
            )
        })
        .unwrap_or_default();

    let recommendation = page
        .recommendation
        .as_ref()
        .map(|text| format!(r#"<div class="tip"><strong>Tip</strong><p>{}</p></div>"#, text))
        .unwrap_or_default();

    let examples = page
        .examples
        .as_ref()
        .map(format_examples_html)
        .unwrap_or_else(|| {
            "<p>No AppImage of the latest release matches this architecture.</p>".to_string()
        });

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Python AppImages - {repo}</title>
    <style>{STYLE}</style>
</head>
<body>
    <h1>Python AppImages</h1>
    <p>{releases}</p>
    {recommendation}
    <h2>Installation</h2>
    {examples}
    <h2>Downloads</h2>
    {matrix}
    {fetch_info}
</body>
</html>"#,
        releases = page.releases_list,
        matrix = page.matrix_html,
    )
}

pub fn format_error_html(repo: &str, error: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Error - {repo}</title>
    <style>{STYLE}</style>
</head>
<body>
    <h1>Python AppImages</h1>
    <div style="padding: 20px; background: #fff5f5; border: 1px solid #d73a49; border-radius: 8px;">
        <strong>Could not load the releases of {repo}</strong>
        <p>{error}</p>
    </div>
</body>
</html>"#
    )
}
