//! `cardwright build`: decorate every page under the content directory.
//!
//! Phases:
//! - **Collect** - Find `*.html` pages with jwalk
//! - **Decorate** - Parse, decorate and write each page in parallel
//! - **Report** - Log block failures and the summary line
//!
//! Output mirrors the content tree. A block failure never stops the build;
//! an unreadable or unwritable page does, after all other pages are written.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use rayon::prelude::*;

use crate::{
    block::{Registry, SiteContext},
    config::SiteConfig,
    debug, log,
    logger::ProgressLine,
    page::{Page, PageReport},
    utils::{path::is_html_page, plural_count},
};

/// Totals over one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub decorated: usize,
    pub untouched: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BuildSummary {
    fn add(&mut self, report: &PageReport) {
        self.pages += 1;
        self.decorated += report.decorated;
        self.untouched += report.untouched;
        self.skipped += report.skipped;
        self.failed += report.failures.len();
    }
}

pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<BuildSummary> {
    let content = &config.build.content;
    let output = &config.build.output;

    let pages = collect_pages(content, output);
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let registry = Registry::builtin();
    let site = config.context();
    let progress = (!quiet).then(|| ProgressLine::new(&[("pages", pages.len())]));

    let results: Vec<_> = pages
        .par_iter()
        .map(|path| {
            let result = build_page(path, config, &registry, &site);
            if let Some(p) = &progress {
                p.inc("pages");
            }
            result
        })
        .collect();

    if let Some(p) = progress {
        p.finish();
    }

    let mut summary = BuildSummary::default();
    let mut page_errors = 0;
    for (path, result) in pages.iter().zip(results) {
        let rel = config.root_relative(path);
        match result {
            Ok(report) => {
                for failure in &report.failures {
                    log!("error"; "{}: {}", rel.display(), failure.error);
                }
                summary.add(&report);
            }
            Err(e) => {
                log!("error"; "{}: {:#}", rel.display(), e);
                page_errors += 1;
            }
        }
    }

    if !quiet {
        log!(
            "build";
            "decorated {} in {}",
            plural_count(summary.decorated, "block"),
            plural_count(summary.pages, "page")
        );
    }
    debug!(
        "build";
        "{} untouched, {} skipped, {} failed",
        summary.untouched, summary.skipped, summary.failed
    );

    if page_errors > 0 {
        bail!("Build failed: {} could not be processed", plural_count(page_errors, "page"));
    }
    if config.build.strict && summary.failed > 0 {
        bail!("Build failed: {} (strict mode)", plural_count(summary.failed, "block failure"));
    }

    Ok(summary)
}

/// HTML pages under `content`, sorted, excluding anything inside `output`.
fn collect_pages(content: &Path, output: &Path) -> Vec<PathBuf> {
    let mut pages: Vec<_> = WalkDir::new(content)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| is_html_page(p) && !p.starts_with(output))
        .collect();
    pages.sort();
    pages
}

/// Decorate one page and write it to its mirrored output path.
fn build_page(
    path: &Path,
    config: &SiteConfig,
    registry: &Registry,
    site: &SiteContext,
) -> Result<PageReport> {
    let source = fs::read_to_string(path).context("Failed to read page")?;
    let mut page = Page::parse(&source)?;

    let ctx = site.merged(&page.metadata());
    let report = page.decorate(registry, &ctx);

    let target = output_path(path, &config.build.content, &config.build.output);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, page.render())
        .with_context(|| format!("Failed to write {}", target.display()))?;

    debug!(
        "page";
        "{}: {} decorated",
        config.root_relative(path).display(),
        plural_count(report.decorated, "block")
    );
    Ok(report)
}

fn output_path(path: &Path, content: &Path, output: &Path) -> PathBuf {
    let rel = path.strip_prefix(content).unwrap_or(path);
    output.join(rel)
}
