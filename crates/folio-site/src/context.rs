//! Per-page build context.

use std::sync::Arc;

use crate::navigation::{MenuTree, NavLink, normalize_path};

/// Build-time data for one page: its neighbours in reading order and the
/// shared menu.
#[derive(Clone, Debug)]
pub struct PageContext {
    /// Site path of the page (without leading or trailing slash).
    pub path: String,
    pub next: Option<NavLink>,
    pub previous: Option<NavLink>,
    pub menu: Arc<MenuTree>,
}

impl PageContext {
    /// Context without previous/next links.
    pub fn new(menu: Arc<MenuTree>, path: &str) -> Self {
        Self {
            path: normalize_path(path).to_owned(),
            next: None,
            previous: None,
            menu,
        }
    }

    /// Context for the page at `path`, with neighbours taken from the menu's
    /// reading order.
    ///
    /// Pages that are not linked from the menu get no neighbours. When the
    /// same path is linked twice, the first occurrence counts.
    pub fn for_path(menu: Arc<MenuTree>, path: &str) -> Self {
        let mut context = Self::new(menu, path);
        let links = context.menu.links();

        if let Some(index) = links.iter().position(|l| l.path == context.path) {
            context.previous = index.checked_sub(1).map(|i| links[i].clone());
            context.next = links.get(index + 1).cloned();
        }

        context
    }
}
