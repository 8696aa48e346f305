//! Documentation site backed by a content backend.
//!
//! [`Site`] assembles pages from CMS documents and the table-of-contents
//! document, and builds the search index.
//!
//! # Thread Safety
//!
//! Navigation indexes are cached per TOC document:
//! - Readers take an `Arc<NavIndex>` snapshot under a short read lock
//! - Loads are serialized by a reload mutex with double-checked validity
//! - `invalidate()` only flips an atomic flag; readers holding a snapshot
//!   keep using it

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use serde_json::Value;
use shelf_cms::{CmsDocument, CmsError, ContentBackend, VERSIONS_DIR, is_versioned};
use shelf_config::Config;
use shelf_content::{Node, RenderResult, RichTextRenderer, plain_text};
use shelf_nav::{ExpandState, NavIndex, NavItemState, NavTree, SlugResolver, normalize_path};
use shelf_search::{SearchIndex, SearchIndexBuilder};
use tracing::{debug, info, warn};

use crate::error::SiteError;
use crate::page::{PageMeta, PageView};

/// Extensions tried when mapping a URL to a document.
const DOCUMENT_EXTENSIONS: &[&str] = &["mdx", "md"];

/// Configuration for [`Site`].
#[derive(Clone, Debug)]
pub struct SiteOptions {
    pub docs_collection: String,
    pub toc_collection: String,
    /// Relative path of the TOC document inside the TOC collection.
    pub toc_document: String,
    pub route_prefix: String,
    pub content_root: String,
    pub page_size: u32,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            docs_collection: "docs".to_owned(),
            toc_collection: "docsTableOfContents".to_owned(),
            toc_document: "docs-toc.json".to_owned(),
            route_prefix: "/docs".to_owned(),
            content_root: "content/docs".to_owned(),
            page_size: 50,
        }
    }
}

impl SiteOptions {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            docs_collection: config.cms.collections.docs.clone(),
            toc_collection: config.cms.collections.toc.clone(),
            toc_document: config.site_resolved.toc_document.clone(),
            route_prefix: config.site_resolved.route_prefix.clone(),
            content_root: config.site_resolved.content_root.clone(),
            page_size: config.cms.page_size,
        }
    }
}

/// Documentation site.
pub struct Site {
    backend: Arc<dyn ContentBackend>,
    options: SiteOptions,
    resolver: SlugResolver,
    renderer: RichTextRenderer,
    /// Mutex for serializing navigation loads.
    reload_lock: Mutex<()>,
    /// Navigation indexes keyed by TOC document path.
    navigation: RwLock<HashMap<String, Arc<NavIndex>>>,
    /// Cache validity flag.
    cache_valid: AtomicBool,
}

impl Site {
    #[must_use]
    pub fn new(backend: Arc<dyn ContentBackend>, options: SiteOptions) -> Self {
        let resolver = SlugResolver::new(&options.route_prefix, &options.content_root);
        Self {
            backend,
            options,
            resolver,
            renderer: RichTextRenderer::new().with_title_extraction(),
            reload_lock: Mutex::new(()),
            navigation: RwLock::new(HashMap::new()),
            cache_valid: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn backend(&self) -> &dyn ContentBackend {
        self.backend.as_ref()
    }

    #[must_use]
    pub fn options(&self) -> &SiteOptions {
        &self.options
    }

    #[must_use]
    pub fn resolver(&self) -> &SlugResolver {
        &self.resolver
    }

    /// Drop cached navigation. The next request reloads it.
    pub fn invalidate(&self) {
        self.cache_valid.store(false, Ordering::Release);
        info!("Navigation cache invalidated");
    }

    /// Navigation index for a URL path (current docs or a version snapshot).
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn navigation_index(&self, url_path: &str) -> Result<Arc<NavIndex>, SiteError> {
        let path = normalize_path(url_path);
        let toc = self.toc_document_for(self.resolver.relative_route(&path).unwrap_or_default());
        self.cached_index(&toc)
    }

    /// Annotated navigation tree for the page at `url_path`.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn navigation(
        &self,
        url_path: &str,
        expand: &ExpandState,
    ) -> Result<Vec<NavItemState>, SiteError> {
        let path = normalize_path(url_path);
        Ok(self.navigation_index(&path)?.active(&path, expand))
    }

    fn cached_index(&self, toc_path: &str) -> Result<Arc<NavIndex>, SiteError> {
        // Fast path: cache valid and populated
        if self.cache_valid.load(Ordering::Acquire)
            && let Some(index) = self.navigation.read().unwrap().get(toc_path)
        {
            return Ok(Arc::clone(index));
        }

        // Slow path: acquire reload lock
        let _guard = self.reload_lock.lock().unwrap();

        if !self.cache_valid.swap(true, Ordering::AcqRel) {
            self.navigation.write().unwrap().clear();
        }
        if let Some(index) = self.navigation.read().unwrap().get(toc_path) {
            return Ok(Arc::clone(index));
        }

        let index = Arc::new(self.load_navigation(toc_path)?);
        self.navigation
            .write()
            .unwrap()
            .insert(toc_path.to_owned(), Arc::clone(&index));
        Ok(index)
    }

    fn load_navigation(&self, toc_path: &str) -> Result<NavIndex, SiteError> {
        let doc = self
            .backend
            .get_document(&self.options.toc_collection, toc_path)?;
        let tree = NavTree::from_json(&Value::Object(doc.values))?;
        let index = NavIndex::new(&tree, &self.resolver);
        debug!(toc_path, nodes = index.len(), "Loaded navigation");
        Ok(index)
    }

    /// TOC document for a route relative to the prefix.
    fn toc_document_for(&self, relative_route: &str) -> String {
        match version_of(relative_route) {
            Some(version) => format!("{VERSIONS_DIR}/{version}/{}", self.options.toc_document),
            None => self.options.toc_document.clone(),
        }
    }

    /// Assemble the page at `url_path`.
    ///
    /// The document and the navigation are fetched in parallel. A navigation
    /// failure degrades to an empty sidebar with a warning.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::PageNotFound` if the path is outside the docs
    /// routes or no document backs it.
    pub fn render_page(&self, url_path: &str) -> Result<PageView, SiteError> {
        let path = normalize_path(url_path);
        let relative = self
            .resolver
            .relative_route(&path)
            .ok_or_else(|| SiteError::PageNotFound(path.clone()))?;
        let toc_path = self.toc_document_for(relative);

        let (document, navigation) =
            rayon::join(|| self.find_document(relative), || self.cached_index(&toc_path));
        let document = document?.ok_or_else(|| SiteError::PageNotFound(path.clone()))?;

        let mut warnings = Vec::new();
        let navigation = navigation.unwrap_or_else(|e| {
            warn!(%toc_path, error = %e, "Navigation unavailable");
            warnings.push(format!("Navigation unavailable: {e}"));
            Arc::new(NavIndex::default())
        });

        let rendered = self.render_body(&document)?;
        warnings.extend(rendered.warnings);

        let title = document
            .str_field("title")
            .map(str::to_owned)
            .or(rendered.title)
            .or_else(|| navigation.title(&path).map(str::to_owned))
            .unwrap_or_else(|| fallback_title(&path));

        Ok(PageView {
            meta: PageMeta {
                title,
                description: document.str_field("description").map(str::to_owned),
                version: version_of(relative).map(str::to_owned),
                source_path: document.relative_path.clone(),
                path: path.clone(),
            },
            breadcrumbs: navigation.breadcrumbs(&path),
            toc: rendered.toc,
            navigation: navigation.active(&path, &ExpandState::new()),
            neighbors: navigation.neighbors(&path),
            html: rendered.html,
            warnings,
        })
    }

    /// First existing document for a relative route.
    fn find_document(&self, relative: &str) -> Result<Option<CmsDocument>, SiteError> {
        for candidate in document_candidates(relative) {
            match self
                .backend
                .get_document(&self.options.docs_collection, &candidate)
            {
                Ok(doc) => return Ok(Some(doc)),
                Err(CmsError::NotFound { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(None)
    }

    fn render_body(&self, document: &CmsDocument) -> Result<RenderResult, SiteError> {
        match document.values.get("body") {
            Some(body) => self.renderer.render_value(body).map_err(|source| SiteError::Body {
                path: document.relative_path.clone(),
                source,
            }),
            None => Ok(RenderResult {
                html: String::new(),
                title: None,
                toc: Vec::new(),
                warnings: Vec::new(),
            }),
        }
    }

    /// Build the static search index from all current (non-versioned) docs.
    ///
    /// Documents with a malformed body are indexed by title only.
    ///
    /// # Errors
    ///
    /// Returns an error if listing the docs collection fails.
    pub fn build_search_index(&self) -> Result<SearchIndex, SiteError> {
        let documents = self
            .backend
            .list_all(&self.options.docs_collection, self.options.page_size)?;
        let navigation = self.cached_index(&self.options.toc_document).ok();

        let mut builder = SearchIndexBuilder::new();
        for doc in documents.iter().filter(|d| !is_versioned(&d.relative_path)) {
            let url = self.resolver.url_for_relative_path(&doc.relative_path);
            let body = match doc.values.get("body").map(Node::from_value) {
                Some(Ok(node)) => Some(node),
                Some(Err(e)) => {
                    warn!(path = %doc.relative_path, error = %e, "Indexing document without body");
                    None
                }
                None => None,
            };
            let text = body.as_ref().map(plain_text).unwrap_or_default();
            let title = doc
                .str_field("title")
                .map(str::to_owned)
                .or_else(|| navigation.as_ref()?.title(&url).map(str::to_owned))
                .or_else(|| body.as_ref().and_then(|b| self.renderer.render(b).title))
                .unwrap_or_else(|| fallback_title(&url));
            builder.add_page(&url, &title, &text);
        }

        info!(documents = builder.len(), "Built search index");
        Ok(builder.build())
    }
}

/// Version number of a route inside a snapshot (`_versions/<n>/...`).
fn version_of(relative_route: &str) -> Option<&str> {
    relative_route
        .strip_prefix(VERSIONS_DIR)?
        .strip_prefix('/')?
        .split('/')
        .next()
        .filter(|v| !v.is_empty())
}

fn document_candidates(relative: &str) -> Vec<String> {
    DOCUMENT_EXTENSIONS
        .iter()
        .flat_map(|ext| {
            if relative.is_empty() {
                vec![format!("index.{ext}")]
            } else {
                vec![format!("{relative}.{ext}"), format!("{relative}/index.{ext}")]
            }
        })
        .collect()
}

fn fallback_title(path: &str) -> String {
    path.rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or("Home")
        .replace(['-', '_'], " ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shelf_cms::MockCms;
    use shelf_nav::Breadcrumb;

    use super::*;

    fn body(heading: &str, text: &str) -> Value {
        json!({"type": "root", "children": [
            {"type": "h2", "children": [{"type": "text", "text": heading}]},
            {"type": "p", "children": [{"type": "text", "text": text}]}
        ]})
    }

    fn toc() -> Value {
        json!({"items": [
            {"title": "Introduction", "slug": "content/docs/index.mdx"},
            {"title": "Guide", "items": [
                {"title": "Install", "slug": "content/docs/guide/install.mdx"},
                {"title": "Configure", "slug": "content/docs/guide/configure.mdx"}
            ]}
        ]})
    }

    fn cms() -> MockCms {
        MockCms::new()
            .with_document(
                "docs",
                "index.mdx",
                json!({"title": "Welcome", "body": body("Overview", "Start here.")}),
            )
            .with_document(
                "docs",
                "guide/install.mdx",
                json!({
                    "title": "Install",
                    "description": "Get going",
                    "body": body("Setup", "Run the installer.")
                }),
            )
            .with_document(
                "docs",
                "guide/configure.mdx",
                json!({"body": body("Options", "Edit shelf.toml.")}),
            )
            .with_document(
                "docs",
                "_versions/1.0/guide/install.mdx",
                json!({"title": "Install (1.0)", "body": body("Setup", "Old steps.")}),
            )
            .with_document("docsTableOfContents", "docs-toc.json", toc())
            .with_document(
                "docsTableOfContents",
                "_versions/1.0/docs-toc.json",
                json!({"items": [
                    {"title": "Install", "slug": "content/docs/_versions/1.0/guide/install.mdx"}
                ]}),
            )
    }

    fn site_with(cms: Arc<MockCms>) -> Site {
        let backend: Arc<dyn ContentBackend> = cms;
        Site::new(backend, SiteOptions::default())
    }

    #[test]
    fn test_render_page() {
        let site = site_with(Arc::new(cms()));

        let page = site.render_page("/docs/guide/install").unwrap();

        assert_eq!(page.meta.title, "Install");
        assert_eq!(page.meta.description.as_deref(), Some("Get going"));
        assert_eq!(page.meta.source_path, "guide/install.mdx");
        assert_eq!(page.meta.version, None);
        assert!(page.html.contains(r#"<h2 id="setup">Setup</h2>"#));
        assert_eq!(page.toc[0].id, "setup");
        assert_eq!(
            page.breadcrumbs,
            vec![
                Breadcrumb {
                    title: "Guide".to_owned(),
                    path: None,
                },
                Breadcrumb {
                    title: "Install".to_owned(),
                    path: Some("/docs/guide/install".to_owned()),
                },
            ]
        );
        assert_eq!(page.neighbors.prev.unwrap().path, "/docs");
        assert_eq!(page.neighbors.next.unwrap().path, "/docs/guide/configure");
        assert!(page.navigation[1].expanded);
        assert!(page.warnings.is_empty());
    }

    #[test]
    fn test_render_index_page() {
        let site = site_with(Arc::new(cms()));

        let page = site.render_page("/docs/").unwrap();

        assert_eq!(page.meta.path, "/docs");
        assert_eq!(page.meta.title, "Welcome");
    }

    #[test]
    fn test_title_falls_back_to_navigation() {
        let site = site_with(Arc::new(cms()));

        let page = site.render_page("/docs/guide/configure").unwrap();

        assert_eq!(page.meta.title, "Configure");
    }

    #[test]
    fn test_versioned_page_uses_versioned_toc() {
        let site = site_with(Arc::new(cms()));

        let page = site.render_page("/docs/_versions/1.0/guide/install").unwrap();

        assert_eq!(page.meta.version.as_deref(), Some("1.0"));
        assert_eq!(page.meta.title, "Install (1.0)");
        assert_eq!(page.navigation.len(), 1);
        assert!(page.navigation[0].selected);
    }

    #[test]
    fn test_missing_page() {
        let site = site_with(Arc::new(cms()));

        assert!(site.render_page("/docs/nope").unwrap_err().is_not_found());
        assert!(site.render_page("/blog/post").unwrap_err().is_not_found());
    }

    #[test]
    fn test_navigation_failure_degrades() {
        let cms = MockCms::new().with_document("docs", "index.mdx", json!({"title": "Home"}));
        let site = site_with(Arc::new(cms));

        let page = site.render_page("/docs").unwrap();

        assert_eq!(page.meta.title, "Home");
        assert!(page.navigation.is_empty());
        assert_eq!(page.warnings.len(), 1);
    }

    #[test]
    fn test_invalidate_reloads_navigation() {
        let cms = Arc::new(cms());
        let site = site_with(Arc::clone(&cms));
        assert_eq!(site.navigation("/docs", &ExpandState::new()).unwrap().len(), 2);

        let updated = json!({"items": [{"title": "Only", "slug": "content/docs/index.mdx"}]});
        cms.update_document("docsTableOfContents", "docs-toc.json", updated.as_object().unwrap())
            .unwrap();
        assert_eq!(site.navigation("/docs", &ExpandState::new()).unwrap().len(), 2);

        site.invalidate();
        let nav = site.navigation("/docs", &ExpandState::new()).unwrap();
        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].title, "Only");
    }

    #[test]
    fn test_build_search_index_skips_versions() {
        let site = site_with(Arc::new(cms()));

        let index = site.build_search_index().unwrap();

        let urls: Vec<_> = index.documents().iter().map(|d| d.url.as_str()).collect();
        assert_eq!(urls, vec!["/docs/guide/configure", "/docs/guide/install", "/docs"]);
        assert_eq!(index.documents()[0].title, "Configure");
        assert_eq!(index.query("installer", 10)[0].url, "/docs/guide/install");
    }

    #[test]
    fn test_version_of() {
        assert_eq!(version_of("_versions/2.1/guide"), Some("2.1"));
        assert_eq!(version_of("_versions/2.1"), Some("2.1"));
        assert_eq!(version_of("_versions"), None);
        assert_eq!(version_of("guide/_versions/1"), None);
    }

    #[test]
    fn test_document_candidates() {
        assert_eq!(
            document_candidates("guide"),
            vec!["guide.mdx", "guide/index.mdx", "guide.md", "guide/index.md"]
        );
        assert_eq!(document_candidates(""), vec!["index.mdx", "index.md"]);
    }
}
