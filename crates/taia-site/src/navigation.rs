//! Navigation menus.
//!
//! A [`NavigationPolicy`] decides which pages appear in the menu for the
//! current page and produces a [`Navigation`] tree. [`render_nav_html`]
//! turns that tree into nested `<ul>` lists.
//!
//! Policies only use the [`PageTree`] query methods and never recurse
//! through the hierarchy with the call stack, so menu size and work stay
//! bounded by the displayed depth.

use std::fmt::Write as _;

use serde::Serialize;
use taia_markup::escape_html;

use crate::tree::PageTree;
use crate::urls::SiteUrls;

/// Navigation item with children for the menu tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Link target.
    pub url: String,
    /// True for the page being rendered.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub active: bool,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    fn new(urls: &SiteUrls, title: &str, current: Option<&str>) -> Self {
        Self {
            title: title.to_owned(),
            url: urls.page(title).unwrap_or_default().to_owned(),
            active: current == Some(title),
            children: Vec::new(),
        }
    }
}

/// Menu for one page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Top-level items (master pages).
    pub items: Vec<NavItem>,
}

/// Strategy choosing which pages the menu shows.
pub trait NavigationPolicy: Send + Sync {
    /// Policy name used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Build the menu for `current`, or for a page outside the tree
    /// (feed and tag pages) when `current` is `None`.
    fn navigation(&self, tree: &PageTree, urls: &SiteUrls, current: Option<&str>) -> Navigation;
}

/// Masters plus the path to the current page and its direct children.
///
/// Every master page is listed alphabetically. The master holding the
/// current page expands along the ancestor chain down to the current page,
/// which lists its own children. Siblings along the way and grandchildren
/// of the current page are not shown.
#[derive(Clone, Copy, Debug, Default)]
pub struct AncestorTrail;

impl NavigationPolicy for AncestorTrail {
    fn name(&self) -> &'static str {
        "trail"
    }

    fn navigation(&self, tree: &PageTree, urls: &SiteUrls, current: Option<&str>) -> Navigation {
        let mut items = masters(tree, urls, current);
        let Some(current) = current.filter(|title| tree.contains(title)) else {
            return Navigation { items };
        };

        // Path from master down to the current page.
        let mut path = tree.ancestor_chain(current);
        path.reverse();
        path.push(current);

        let mut branch: Vec<NavItem> = tree
            .children_of(current)
            .into_iter()
            .map(|child| NavItem::new(urls, child, Some(current)))
            .collect();
        for title in path[1..].iter().rev() {
            let mut item = NavItem::new(urls, title, Some(current));
            item.children = branch;
            branch = vec![item];
        }

        if let Some(master) = items.iter_mut().find(|item| item.title == path[0]) {
            master.children = branch;
        }
        Navigation { items }
    }
}

/// Master pages only.
#[derive(Clone, Copy, Debug, Default)]
pub struct MastersOnly;

impl NavigationPolicy for MastersOnly {
    fn name(&self) -> &'static str {
        "masters"
    }

    fn navigation(&self, tree: &PageTree, urls: &SiteUrls, current: Option<&str>) -> Navigation {
        Navigation {
            items: masters(tree, urls, current),
        }
    }
}

/// The whole hierarchy, expanded up to `max_depth` levels below the masters.
#[derive(Clone, Copy, Debug)]
pub struct FullTree {
    /// Levels shown below master pages; `0` shows masters only.
    pub max_depth: usize,
}

impl Default for FullTree {
    fn default() -> Self {
        Self { max_depth: 8 }
    }
}

struct Frame<'t> {
    item: NavItem,
    pending: std::vec::IntoIter<&'t str>,
    depth: usize,
}

impl NavigationPolicy for FullTree {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn navigation(&self, tree: &PageTree, urls: &SiteUrls, current: Option<&str>) -> Navigation {
        let frame = |title: &str, depth: usize| Frame {
            item: NavItem::new(urls, title, current),
            pending: tree.children_of(title).into_iter(),
            depth,
        };

        let mut items = Vec::new();
        for root in tree.root_titles() {
            let mut stack = vec![frame(root, 0)];
            while let Some(top) = stack.last_mut() {
                let depth = top.depth;
                let next = if depth < self.max_depth {
                    top.pending.next()
                } else {
                    None
                };
                if let Some(child) = next {
                    stack.push(frame(child, depth + 1));
                    continue;
                }

                let Some(done) = stack.pop() else { break };
                match stack.last_mut() {
                    Some(parent) => parent.item.children.push(done.item),
                    None => items.push(done.item),
                }
            }
        }
        Navigation { items }
    }
}

/// Built-in policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavigationKind {
    /// [`AncestorTrail`].
    #[default]
    Trail,
    /// [`MastersOnly`].
    Masters,
    /// [`FullTree`] with the given depth limit.
    Tree {
        /// Levels shown below master pages.
        max_depth: usize,
    },
}

impl NavigationKind {
    /// Instantiate the policy.
    #[must_use]
    pub fn policy(self) -> Box<dyn NavigationPolicy> {
        match self {
            Self::Trail => Box::new(AncestorTrail),
            Self::Masters => Box::new(MastersOnly),
            Self::Tree { max_depth } => Box::new(FullTree { max_depth }),
        }
    }
}

fn masters(tree: &PageTree, urls: &SiteUrls, current: Option<&str>) -> Vec<NavItem> {
    tree.root_titles()
        .into_iter()
        .map(|title| NavItem::new(urls, title, current))
        .collect()
}

enum Step<'n> {
    Item(&'n NavItem),
    Close,
}

/// Render a menu as nested `<ul>` lists.
///
/// The active item carries `class="active"`. An empty menu renders as an
/// empty list.
#[must_use]
pub fn render_nav_html(nav: &Navigation) -> String {
    let mut html = String::from("<ul class=\"nav\">");
    let mut steps: Vec<Step<'_>> = nav.items.iter().rev().map(Step::Item).collect();

    while let Some(step) = steps.pop() {
        let item = match step {
            Step::Close => {
                html.push_str("</ul></li>");
                continue;
            }
            Step::Item(item) => item,
        };

        html.push_str(if item.active {
            "<li class=\"active\">"
        } else {
            "<li>"
        });
        let _ = write!(
            html,
            "<a href=\"{}\">{}</a>",
            escape_html(&item.url),
            escape_html(&item.title)
        );
        if item.children.is_empty() {
            html.push_str("</li>");
        } else {
            html.push_str("<ul>");
            steps.push(Step::Close);
            steps.extend(item.children.iter().rev().map(Step::Item));
        }
    }

    html.push_str("</ul>");
    html
}

/// Build and render the menu for `current` with `policy`.
#[must_use]
pub fn render_nav(
    tree: &PageTree,
    urls: &SiteUrls,
    policy: &dyn NavigationPolicy,
    current: Option<&str>,
) -> String {
    render_nav_html(&policy.navigation(tree, urls, current))
}
