//! `cardwright render`: decorate one input and print it.
//!
//! Without `--block` the input is treated like a page: every fragment whose
//! first class names a block is decorated, with `<meta>` tags feeding the
//! context. With `--block` the named block is applied to the first top-level
//! element.

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow, bail};

use super::RenderArgs;
use crate::{
    block::{Decorate, Outcome, Registry, SiteContext},
    config::SiteConfig,
    debug,
    dom::{Node, parse_fragment, render_nodes},
    log,
    page::Page,
    utils::plural_count,
};

pub fn render(args: &RenderArgs, config: &SiteConfig) -> Result<()> {
    let source = read_input(&args.input)?;
    let registry = Registry::builtin();
    let overrides: SiteContext = args.meta.iter().map(|(k, v)| (k, v.as_str())).collect();

    let html = match &args.block {
        Some(name) => {
            let block = registry.get(name)?;
            let ctx = config.context().merged(&overrides);
            render_fragment(&source, block, &ctx)?
        }
        None => render_page(&source, &registry, &config.context(), &overrides)?,
    };

    write_output(args.output.as_deref(), &html)
}

/// Apply `block` to the first top-level element of `source`.
fn render_fragment(source: &str, block: &dyn Decorate, ctx: &SiteContext) -> Result<String> {
    let mut nodes = parse_fragment(source)?;
    let fragment = nodes
        .iter_mut()
        .find_map(Node::as_element_mut)
        .ok_or_else(|| anyhow!("input has no element to decorate"))?;

    if block.decorate(fragment, ctx)? == Outcome::Untouched {
        log!("render"; "block `{}` rendered nothing, input left as authored", block.name());
    }
    Ok(render_nodes(&nodes))
}

/// Decorate every block fragment of `source`.
///
/// Context precedence: `[metadata]` < page `<meta>` < `--meta`.
fn render_page(
    source: &str,
    registry: &Registry,
    site: &SiteContext,
    overrides: &SiteContext,
) -> Result<String> {
    let mut page = Page::parse(source)?;
    let ctx = site.merged(&page.metadata()).merged(overrides);
    let report = page.decorate(registry, &ctx);

    for failure in &report.failures {
        log!("error"; "{}", failure.error);
    }
    if !report.is_clean() {
        bail!(
            "{} of {} failed",
            plural_count(report.failures.len(), "block"),
            report.fragments()
        );
    }

    debug!("render"; "{} decorated", plural_count(report.decorated, "block"));
    Ok(page.render())
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }
    fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn write_output(output: Option<&Path>, html: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
            log!("render"; "wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{html}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockError;

    #[test]
    fn test_render_fragment_with_named_block() {
        let registry = Registry::builtin();
        let html = render_fragment(
            r#"<div class="whatever"><div>Engineer at Acme</div></div>"#,
            registry.get("import-about").unwrap(),
            &SiteContext::new(),
        )
        .unwrap();
        assert_eq!(
            html,
            concat!(
                r#"<div class="whatever" data-block-name="about" data-block-status="decorated">"#,
                r#"<section class="about-section"><h2>About</h2><p>Engineer at Acme</p></section></div>"#,
            )
        );
    }

    #[test]
    fn test_render_fragment_propagates_block_error() {
        let registry = Registry::builtin();
        let err = render_fragment(
            r#"<div class="activity"></div>"#,
            registry.get("activity").unwrap(),
            &SiteContext::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BlockError>(),
            Some(BlockError::MissingFields { .. })
        ));
    }

    #[test]
    fn test_render_fragment_needs_an_element() {
        let registry = Registry::builtin();
        let err = render_fragment("just text", registry.get("about").unwrap(), &SiteContext::new())
            .unwrap_err();
        assert!(err.to_string().contains("no element"));
    }

    #[test]
    fn test_render_page_context_precedence() {
        let site = SiteContext::new()
            .with("category", "Site")
            .with("content-technology", "Rust");
        let overrides = SiteContext::new().with("category", "Override");
        let html = render_page(
            r#"<meta name="category" content="Page"><div class="tags"></div>"#,
            &Registry::builtin(),
            &site,
            &overrides,
        )
        .unwrap();
        assert!(html.contains(r#"<span class="card-tag">Rust</span>"#));
        assert!(html.contains(r#"<span class="card-tag alt">Override</span>"#));
    }

    #[test]
    fn test_render_page_fails_on_broken_block() {
        let err = render_page(
            r#"<div class="featured"></div>"#,
            &Registry::builtin(),
            &SiteContext::new(),
            &SiteContext::new(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "1 block of 1 failed");
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        write_output(Some(&path), "<p>x</p>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>x</p>");
        assert_eq!(read_input(&path).unwrap(), "<p>x</p>");
    }
}
