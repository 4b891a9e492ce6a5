//! # Navigation
//!
//! A root stack (`Login`, `Register`, `MainTabs`) with a tab shell inside
//! `MainTabs`.
//!
//! ```text
//! [Login] ──Ctrl+R──▶ [Login, Register] ──success──▶ [Login]
//!    │
//!    └──login──▶ reset ▶ [MainTabs(Home | Books | Profile)]
//!                              │
//!                              └──logout──▶ reset ▶ [Login]
//! ```
//!
//! Tabs mount lazily on first focus; `Navigator::select_tab` reports the
//! first focus so the caller can run the screen's mount effect.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    MainTabs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Books,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Home, Tab::Books, Tab::Profile];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Books => "Books",
            Tab::Profile => "Profile",
        }
    }

    fn index(self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Books => 1,
            Tab::Profile => 2,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
    tab: Tab,
    mounted_tabs: Vec<Tab>,
    /// Bumped on every reset. Replies tagged with an older generation are stale.
    generation: u64,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        let mut nav = Self {
            stack: Vec::new(),
            tab: Tab::default(),
            mounted_tabs: Vec::new(),
            generation: 0,
        };
        nav.reset(initial);
        nav
    }

    pub fn current(&self) -> Route {
        // The stack is never empty: reset() always leaves one route.
        self.stack.last().copied().unwrap_or(Route::Login)
    }

    pub fn stack(&self) -> &[Route] {
        &self.stack
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the whole stack with a single route. Entering `MainTabs`
    /// starts on the Home tab with nothing else mounted.
    pub fn reset(&mut self, route: Route) {
        self.generation = self.generation.wrapping_add(1);
        self.stack = vec![route];
        self.tab = Tab::default();
        self.mounted_tabs = if route == Route::MainTabs {
            vec![Tab::default()]
        } else {
            Vec::new()
        };
    }

    /// Go to `route`: pop back to it if it is already on the stack,
    /// otherwise push it.
    pub fn navigate(&mut self, route: Route) {
        if let Some(pos) = self.stack.iter().position(|r| *r == route) {
            self.stack.truncate(pos + 1);
        } else {
            self.stack.push(route);
        }
    }

    /// Pop the top route. Returns false at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Focus a tab. Returns true when this is the tab's first focus since the
    /// shell was entered (i.e. the screen mounts now).
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if self.current() != Route::MainTabs {
            return false;
        }
        self.tab = tab;
        if self.mounted_tabs.contains(&tab) {
            false
        } else {
            self.mounted_tabs.push(tab);
            true
        }
    }

    pub fn is_mounted(&self, tab: Tab) -> bool {
        self.mounted_tabs.contains(&tab)
    }
}
